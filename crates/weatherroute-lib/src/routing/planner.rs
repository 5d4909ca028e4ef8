//! Search planners implementing the Strategy pattern.
//!
//! Each planner pairs the A* engine with one open set implementation. Adding
//! a queue flavour means adding a planner, not touching [`super::PathFinder`].

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::modifiers::CostModifiers;
use crate::observer::SearchObserver;
use crate::path::{AStarSearch, SearchStats};
use crate::queue::{BinaryMinHeap, IndexedMinHeap, OpenSet};

use super::{QueueStrategy, SearchOptions};

/// Raw result of a planner run, before names are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Path from start to goal and its total cost, if the goal was reached.
    pub path: Option<(Vec<NodeId>, f64)>,
    pub stats: SearchStats,
}

/// Trait for search strategies.
pub trait SearchPlanner: Send + Sync {
    /// The open set flavour used by this planner.
    fn strategy(&self) -> QueueStrategy;

    /// Run A* from `start` to `goal` to completion.
    fn search(
        &self,
        graph: &Graph,
        modifiers: &CostModifiers,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchOutcome>;
}

/// Planner backed by [`BinaryMinHeap`]; nodes are re-queued on every
/// improvement and stale entries stay in the heap.
#[derive(Debug, Clone, Default)]
pub struct LazyHeapPlanner {
    skip_stale_entries: bool,
    max_expansions: Option<usize>,
}

impl LazyHeapPlanner {
    pub fn from_options(options: &SearchOptions) -> Self {
        Self {
            skip_stale_entries: options.skip_stale_entries,
            max_expansions: options.max_expansions,
        }
    }
}

impl SearchPlanner for LazyHeapPlanner {
    fn strategy(&self) -> QueueStrategy {
        QueueStrategy::LazyDuplicates
    }

    fn search(
        &self,
        graph: &Graph,
        modifiers: &CostModifiers,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchOutcome> {
        let open = BinaryMinHeap::<NodeId>::with_capacity(graph.node_bound());
        let search = AStarSearch::new(graph, modifiers, start, goal, open)?
            .skip_stale_entries(self.skip_stale_entries);
        drive(search, self.max_expansions, observer)
    }
}

/// Planner backed by [`IndexedMinHeap`]; each node is queued at most once.
#[derive(Debug, Clone, Default)]
pub struct DecreaseKeyPlanner {
    max_expansions: Option<usize>,
}

impl DecreaseKeyPlanner {
    pub fn from_options(options: &SearchOptions) -> Self {
        Self {
            max_expansions: options.max_expansions,
        }
    }
}

impl SearchPlanner for DecreaseKeyPlanner {
    fn strategy(&self) -> QueueStrategy {
        QueueStrategy::DecreaseKey
    }

    fn search(
        &self,
        graph: &Graph,
        modifiers: &CostModifiers,
        start: NodeId,
        goal: NodeId,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchOutcome> {
        let open = IndexedMinHeap::<NodeId>::with_capacity(graph.node_bound());
        let search = AStarSearch::new(graph, modifiers, start, goal, open)?;
        drive(search, self.max_expansions, observer)
    }
}

/// Select the planner matching the configured strategy.
pub fn select_planner(options: &SearchOptions) -> Box<dyn SearchPlanner> {
    match options.strategy {
        QueueStrategy::LazyDuplicates => Box::new(LazyHeapPlanner::from_options(options)),
        QueueStrategy::DecreaseKey => Box::new(DecreaseKeyPlanner::from_options(options)),
    }
}

/// Step `search` to a terminal state, enforcing the expansion limit.
fn drive<Q: OpenSet<NodeId>>(
    mut search: AStarSearch<'_, Q>,
    max_expansions: Option<usize>,
    observer: &mut dyn SearchObserver,
) -> Result<SearchOutcome> {
    while !search.state().is_terminal() {
        if let Some(limit) = max_expansions {
            if search.stats().expansions >= limit {
                tracing::warn!(limit, "search expansion limit reached");
                return Err(Error::SearchLimitExceeded { limit });
            }
        }
        search.step(observer)?;
    }

    Ok(SearchOutcome {
        path: search.path(),
        stats: search.stats(),
    })
}

//! Route planning entry points.
//!
//! This module provides:
//! - [`QueueStrategy`] - Open set flavour used by the search
//! - [`SearchOptions`] - Search configuration, loadable from JSON
//! - [`PathFinder`] - Runs A* between two named nodes
//! - [`PathResult`] - Either a [`Route`] or an explicit "no path"
//! - [`find_path`] - Convenience wrapper using default options
//!
//! # Strategy Pattern
//!
//! Each open set strategy is wrapped in a planner implementing
//! [`SearchPlanner`], so the orchestration in [`PathFinder`] does not depend
//! on the queue type.
//!
//! # Example
//!
//! ```
//! use weatherroute_lib::{find_path, CostModifiers, Graph};
//!
//! let mut graph = Graph::new();
//! graph.add_node("A", 0.0, 0.0)?;
//! graph.add_node("B", 3.0, 4.0)?;
//! graph.add_edge("A", "B", 5.0)?;
//! let modifiers = CostModifiers::from_pairs(&graph, [("B", 1.5)])?;
//!
//! let route = find_path(&graph, "A", "B", &modifiers)?.into_route()?;
//! assert_eq!(route.total_cost, 6.5);
//! # Ok::<(), weatherroute_lib::Error>(())
//! ```

mod planner;

pub use planner::{
    select_planner, DecreaseKeyPlanner, LazyHeapPlanner, SearchOutcome, SearchPlanner,
};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::modifiers::CostModifiers;
use crate::observer::{NoopObserver, SearchObserver};
use crate::path::SearchStats;

/// Open set implementation used by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QueueStrategy {
    /// Binary heap that re-queues nodes on every improvement.
    #[default]
    LazyDuplicates,
    /// Indexed heap that lowers a queued node's priority in place.
    DecreaseKey,
}

impl fmt::Display for QueueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            QueueStrategy::LazyDuplicates => "lazy-duplicates",
            QueueStrategy::DecreaseKey => "decrease-key",
        };
        f.write_str(value)
    }
}

/// Configuration for a [`PathFinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
    pub strategy: QueueStrategy,
    /// Drop popped entries that are older than the node's best estimate.
    /// Only applies to [`QueueStrategy::LazyDuplicates`]; the decrease-key
    /// heap never holds stale entries, so the flag is ignored there.
    pub skip_stale_entries: bool,
    /// Abort with [`Error::SearchLimitExceeded`] after this many expansions.
    pub max_expansions: Option<usize>,
}

impl SearchOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_strategy(mut self, strategy: QueueStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}

/// Lowest-cost route found by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Nodes from start to goal, both inclusive.
    pub steps: Vec<NodeId>,
    /// Sum of edge costs plus the modifier of every entered node.
    pub total_cost: f64,
    pub stats: SearchStats,
}

/// One hop of a [`Route`] with its cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub edge_cost: f64,
    /// Modifier charged for entering `to`.
    pub modifier: f64,
    pub cost: f64,
}

impl Route {
    /// Number of edges in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<NodeId> {
        self.steps.first().copied()
    }

    pub fn goal(&self) -> Option<NodeId> {
        self.steps.last().copied()
    }

    /// Node names along the route.
    pub fn names<'g>(&self, graph: &'g Graph) -> Result<Vec<&'g str>> {
        self.steps
            .iter()
            .map(|&id| graph.require_node(id).map(|node| node.name.as_str()))
            .collect()
    }

    /// Per-hop breakdown using the cheapest edge between consecutive nodes.
    pub fn legs(&self, graph: &Graph, modifiers: &CostModifiers) -> Result<Vec<RouteLeg>> {
        self.steps
            .windows(2)
            .map(|pair| -> Result<RouteLeg> {
                let from = graph.require_node(pair[0])?;
                let to = graph.require_node(pair[1])?;
                let edge_cost = graph.edge_cost(from.id, to.id).ok_or_else(|| {
                    Error::RouteNotFound {
                        start: from.name.clone(),
                        goal: to.name.clone(),
                    }
                })?;
                let modifier = modifiers.get(to.id);
                Ok(RouteLeg {
                    from: from.name.clone(),
                    to: to.name.clone(),
                    edge_cost,
                    modifier,
                    cost: edge_cost + modifier,
                })
            })
            .collect()
    }

    /// Render the route as `A -(4.0)-> B -(7.0)-> D`.
    pub fn describe(&self, graph: &Graph) -> Result<String> {
        let names = self.names(graph)?;
        let mut out = String::new();
        for (index, name) in names.iter().enumerate() {
            if index > 0 {
                let cost = graph
                    .edge_cost(self.steps[index - 1], self.steps[index])
                    .unwrap_or_default();
                out.push_str(&format!(" -({cost:.1})-> "));
            }
            out.push_str(name);
        }
        Ok(out)
    }
}

/// Outcome of a search. `NoPath` is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PathResult {
    Found(Route),
    NoPath {
        start: String,
        goal: String,
        stats: SearchStats,
    },
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            PathResult::Found(route) => Some(route),
            PathResult::NoPath { .. } => None,
        }
    }

    pub fn stats(&self) -> SearchStats {
        match self {
            PathResult::Found(route) => route.stats,
            PathResult::NoPath { stats, .. } => *stats,
        }
    }

    /// Turn a missing path into [`Error::RouteNotFound`].
    pub fn into_route(self) -> Result<Route> {
        match self {
            PathResult::Found(route) => Ok(route),
            PathResult::NoPath { start, goal, .. } => Err(Error::RouteNotFound { start, goal }),
        }
    }
}

/// A* route finder configured by [`SearchOptions`].
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    options: SearchOptions,
}

impl PathFinder {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Find the cheapest route between two named nodes.
    pub fn find_path(
        &self,
        graph: &Graph,
        start: &str,
        goal: &str,
        modifiers: &CostModifiers,
    ) -> Result<PathResult> {
        self.find_path_observed(graph, start, goal, modifiers, &mut NoopObserver)
    }

    /// Like [`PathFinder::find_path`], reporting progress to `observer`.
    pub fn find_path_observed(
        &self,
        graph: &Graph,
        start: &str,
        goal: &str,
        modifiers: &CostModifiers,
        observer: &mut dyn SearchObserver,
    ) -> Result<PathResult> {
        let start_id = graph.resolve(start)?;
        let goal_id = graph.resolve(goal)?;
        self.find_path_between(graph, start_id, goal_id, modifiers, observer)
    }

    /// Search between two node handles.
    ///
    /// Handles that do not belong to `graph` are rejected with
    /// [`Error::UnknownNode`] before any work is done.
    pub fn find_path_between(
        &self,
        graph: &Graph,
        start: NodeId,
        goal: NodeId,
        modifiers: &CostModifiers,
        observer: &mut dyn SearchObserver,
    ) -> Result<PathResult> {
        let start_name = graph.require_node(start)?.name.clone();
        let goal_name = graph.require_node(goal)?.name.clone();

        let planner = select_planner(&self.options);
        debug!(
            start = %start_name,
            goal = %goal_name,
            strategy = %planner.strategy(),
            "starting route search"
        );

        let outcome = planner.search(graph, modifiers, start, goal, observer)?;
        let stats = outcome.stats;
        let result = match outcome.path {
            Some((steps, total_cost)) => {
                debug!(
                    hops = steps.len().saturating_sub(1),
                    total_cost,
                    expansions = stats.expansions,
                    "route found"
                );
                PathResult::Found(Route {
                    steps,
                    total_cost,
                    stats,
                })
            }
            None => {
                debug!(expansions = stats.expansions, "no route between nodes");
                PathResult::NoPath {
                    start: start_name,
                    goal: goal_name,
                    stats,
                }
            }
        };
        Ok(result)
    }
}

/// Find a route with the default [`SearchOptions`].
pub fn find_path(
    graph: &Graph,
    start: &str,
    goal: &str,
    modifiers: &CostModifiers,
) -> Result<PathResult> {
    PathFinder::default().find_path(graph, start, goal, modifiers)
}

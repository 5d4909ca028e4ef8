//! A* search engine.
//!
//! [`AStarSearch`] owns the per-invocation state (scores, back-pointers and
//! the open set) and advances one expansion per [`AStarSearch::step`]. The
//! open set may hold several entries for the same node; each expansion reads
//! the node's latest `g_score`, so stale entries cost time but never change
//! the result.

use serde::Serialize;

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::modifiers::CostModifiers;
use crate::observer::{SearchEvent, SearchObserver};
use crate::queue::OpenSet;

/// Lifecycle of a single search. `Found` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    Unstarted,
    Running,
    Found,
    Exhausted,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Found | SearchState::Exhausted)
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes popped and expanded (the goal pop included).
    pub expansions: usize,
    /// Successful strict-improvement updates.
    pub relaxations: usize,
    /// Entries pushed onto the open set.
    pub pushes: usize,
    /// Entries discarded because a cheaper entry for the node was queued.
    pub stale_skipped: usize,
}

/// A single A* invocation between two nodes of a graph.
pub struct AStarSearch<'a, Q> {
    graph: &'a Graph,
    modifiers: &'a CostModifiers,
    start: NodeId,
    goal: NodeId,
    open: Q,
    g_score: Vec<f64>,
    f_score: Vec<f64>,
    came_from: Vec<Option<NodeId>>,
    state: SearchState,
    skip_stale: bool,
    stats: SearchStats,
}

impl<'a, Q: OpenSet<NodeId>> AStarSearch<'a, Q> {
    /// Prepare a search. Fails with [`crate::Error::UnknownNode`] when either
    /// handle does not belong to `graph`.
    pub fn new(
        graph: &'a Graph,
        modifiers: &'a CostModifiers,
        start: NodeId,
        goal: NodeId,
        open: Q,
    ) -> Result<Self> {
        graph.require_node(start)?;
        graph.require_node(goal)?;

        let len = graph.node_bound();
        Ok(Self {
            graph,
            modifiers,
            start,
            goal,
            open,
            g_score: vec![f64::INFINITY; len],
            f_score: vec![f64::INFINITY; len],
            came_from: vec![None; len],
            state: SearchState::Unstarted,
            skip_stale: false,
            stats: SearchStats::default(),
        })
    }

    /// Discard popped entries whose priority exceeds the node's current
    /// `f_score`. A fresher entry for the same node is always still queued.
    pub fn skip_stale_entries(mut self, enabled: bool) -> Self {
        self.skip_stale = enabled;
        self
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Best known cost from the start to `node`.
    pub fn g_score(&self, node: NodeId) -> f64 {
        self.g_score
            .get(node.index())
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Advance the search by one expansion and return the new state.
    ///
    /// The first call seeds the open set with the start node. Calls on a
    /// terminal search do nothing.
    pub fn step(&mut self, observer: &mut dyn SearchObserver) -> Result<SearchState> {
        match self.state {
            SearchState::Found | SearchState::Exhausted => return Ok(self.state),
            SearchState::Unstarted => {
                self.seed(observer);
                return Ok(self.state);
            }
            SearchState::Running => {}
        }

        if self.open.is_empty() {
            return Ok(self.exhaust(observer));
        }

        let (current, priority) = self.open.pop_min()?;
        let current_index = current.index();
        if self.skip_stale && priority > self.f_score[current_index] {
            self.stats.stale_skipped += 1;
            return Ok(self.exhaust_if_drained(observer));
        }

        self.stats.expansions += 1;
        observer.on_event(&SearchEvent::NodeExpanded {
            name: self.name(current).to_string(),
        });

        if current == self.goal {
            self.state = SearchState::Found;
            let length = reconstruct_path(&self.came_from, self.start, self.goal).len();
            observer.on_event(&SearchEvent::PathFound {
                length,
                total_cost: self.g_score[current_index],
            });
            return Ok(self.state);
        }

        let current_score = self.g_score[current_index];
        for (neighbour, cost) in self.graph.neighbours(current) {
            let edge_cost = cost + self.modifiers.get(neighbour);
            let tentative = current_score + edge_cost;
            let index = neighbour.index();
            if tentative < self.g_score[index] {
                let estimate = tentative + self.graph.heuristic(neighbour, self.goal);
                self.came_from[index] = Some(current);
                self.g_score[index] = tentative;
                self.f_score[index] = estimate;
                self.open.push(neighbour, estimate);
                self.stats.relaxations += 1;
                self.stats.pushes += 1;
                observer.on_event(&SearchEvent::NodeRelaxed {
                    name: self.name(neighbour).to_string(),
                    new_cost: tentative,
                    estimate,
                });
            }
        }

        Ok(self.exhaust_if_drained(observer))
    }

    /// Step until the search reaches a terminal state.
    pub fn run(&mut self, observer: &mut dyn SearchObserver) -> Result<SearchState> {
        while !self.state.is_terminal() {
            self.step(observer)?;
        }
        Ok(self.state)
    }

    /// Nodes from start to goal and the total cost, once the goal was found.
    pub fn path(&self) -> Option<(Vec<NodeId>, f64)> {
        if self.state != SearchState::Found {
            return None;
        }
        let path = reconstruct_path(&self.came_from, self.start, self.goal);
        Some((path, self.g_score[self.goal.index()]))
    }

    /// The search is over as soon as nothing is left to expand.
    fn exhaust_if_drained(&mut self, observer: &mut dyn SearchObserver) -> SearchState {
        if self.open.is_empty() {
            self.exhaust(observer)
        } else {
            self.state
        }
    }

    fn exhaust(&mut self, observer: &mut dyn SearchObserver) -> SearchState {
        self.state = SearchState::Exhausted;
        observer.on_event(&SearchEvent::PathNotFound);
        self.state
    }

    fn seed(&mut self, observer: &mut dyn SearchObserver) {
        let start = self.start.index();
        let estimate = self.graph.heuristic(self.start, self.goal);
        self.g_score[start] = 0.0;
        self.f_score[start] = estimate;
        self.open.push(self.start, estimate);
        self.stats.pushes += 1;
        self.state = SearchState::Running;
        observer.on_event(&SearchEvent::SearchStarted {
            start: self.name(self.start).to_string(),
            goal: self.name(self.goal).to_string(),
        });
    }

    fn name(&self, node: NodeId) -> &str {
        self.graph.node_name(node).unwrap_or_default()
    }
}

/// Follow back-pointers from `goal` to the node without one, then reverse.
fn reconstruct_path(came_from: &[Option<NodeId>], start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start || path.len() > came_from.len() {
            break;
        }
        current = came_from.get(node.index()).copied().flatten();
    }
    debug_assert_eq!(path.last(), Some(&start), "back-pointers must lead to start");
    path.reverse();
    path
}

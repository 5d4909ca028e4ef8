//! Structured trace events emitted while a search runs.
//!
//! Observers only watch: nothing they do feeds back into the search.

use serde::Serialize;

/// Event emitted by the A* engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    /// The open set was seeded with the start node.
    SearchStarted { start: String, goal: String },
    /// A node was popped from the open set.
    NodeExpanded { name: String },
    /// A cheaper path to `name` was found. `new_cost` is the cost from the
    /// start, `estimate` adds the heuristic to the goal.
    NodeRelaxed {
        name: String,
        new_cost: f64,
        estimate: f64,
    },
    /// The goal was popped; `length` counts the nodes on the path.
    PathFound { length: usize, total_cost: f64 },
    /// The open set ran dry before reaching the goal.
    PathNotFound,
}

/// Sink for [`SearchEvent`]s.
pub trait SearchObserver {
    fn on_event(&mut self, event: &SearchEvent);
}

impl<F> SearchObserver for F
where
    F: FnMut(&SearchEvent),
{
    fn on_event(&mut self, event: &SearchEvent) {
        self(event)
    }
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_event(&mut self, _event: &SearchEvent) {}
}

/// Observer forwarding events to `tracing` at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_event(&mut self, event: &SearchEvent) {
        match event {
            SearchEvent::SearchStarted { start, goal } => {
                tracing::trace!(%start, %goal, "search started")
            }
            SearchEvent::NodeExpanded { name } => tracing::trace!(node = %name, "expanding node"),
            SearchEvent::NodeRelaxed {
                name,
                new_cost,
                estimate,
            } => tracing::trace!(node = %name, new_cost, estimate, "relaxed neighbour"),
            SearchEvent::PathFound { length, total_cost } => {
                tracing::trace!(length, total_cost, "goal reached")
            }
            SearchEvent::PathNotFound => tracing::trace!("open set exhausted"),
        }
    }
}

/// Observer that keeps every event in order, mostly useful in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<SearchEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<SearchEvent> {
        self.events
    }

    /// Names of expanded nodes, in expansion order.
    pub fn expanded(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SearchEvent::NodeExpanded { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl SearchObserver for RecordingObserver {
    fn on_event(&mut self, event: &SearchEvent) {
        self.events.push(event.clone());
    }
}

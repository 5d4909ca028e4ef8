//! weatherroute library entry points.
//!
//! This crate builds weighted, undirected graphs of named points on a plane
//! and finds lowest-cost routes between them with A*. Entering a node costs
//! the edge weight plus that node's weather modifier. Consumers should depend
//! on the items exported here rather than the individual modules.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod logging;
pub mod modifiers;
pub mod observer;
pub mod path;
pub mod queue;
pub mod routing;

pub use error::{Error, Result};
pub use graph::{Edge, EdgeView, Graph, Node, NodeId, Position};
pub use logging::{init_tracing, try_init_tracing};
pub use modifiers::CostModifiers;
pub use observer::{NoopObserver, RecordingObserver, SearchEvent, SearchObserver, TracingObserver};
pub use path::{AStarSearch, SearchState, SearchStats};
pub use queue::{BinaryMinHeap, IndexedMinHeap, OpenSet};
pub use routing::{
    find_path, PathFinder, PathResult, QueueStrategy, Route, RouteLeg, SearchOptions,
};

//! Per-node traversal penalties ("weather impact").
//!
//! A modifier is charged whenever a route enters the node it belongs to. The
//! start node of a route is never entered, so its modifier is never paid.

use crate::error::Result;
use crate::graph::{validate_cost, Graph, NodeId};

/// Non-negative cost added when a route enters a node.
///
/// Nodes without an assigned value use `0.0`, including nodes added to the
/// graph after the table was built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostModifiers {
    values: Vec<f64>,
}

impl CostModifiers {
    /// Table with a zero modifier for every node currently in `graph`.
    pub fn new(graph: &Graph) -> Self {
        Self {
            values: vec![0.0; graph.node_bound()],
        }
    }

    /// Build a table from `(name, modifier)` pairs, rejecting unknown names and
    /// invalid values.
    pub fn from_pairs<'a, I>(graph: &Graph, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut modifiers = Self::new(graph);
        for (name, value) in pairs {
            modifiers.set(graph, name, value)?;
        }
        Ok(modifiers)
    }

    /// Assign the modifier for the node called `name`.
    pub fn set(&mut self, graph: &Graph, name: &str, value: f64) -> Result<()> {
        let id = graph.resolve(name)?;
        self.set_id(id, value, name)
    }

    /// Assign the modifier for a node handle.
    pub fn set_by_id(&mut self, graph: &Graph, id: NodeId, value: f64) -> Result<()> {
        let node = graph.require_node(id)?;
        self.set_id(id, value, &node.name)
    }

    fn set_id(&mut self, id: NodeId, value: f64, name: &str) -> Result<()> {
        validate_cost(value, || format!("cost modifier of {name}"))?;
        if self.values.len() <= id.index() {
            self.values.resize(id.index() + 1, 0.0);
        }
        self.values[id.index()] = value;
        Ok(())
    }

    /// Reset the modifier of `id` to zero, typically after the node was
    /// removed with [`Graph::remove_node`].
    pub fn forget(&mut self, id: NodeId) {
        if let Some(value) = self.values.get_mut(id.index()) {
            *value = 0.0;
        }
    }

    /// Modifier charged when entering `id`.
    pub fn get(&self, id: NodeId) -> f64 {
        self.values.get(id.index()).copied().unwrap_or(0.0)
    }
}

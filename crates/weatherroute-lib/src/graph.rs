use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a node name to be offered as a
/// suggestion when a lookup fails.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Number of suggestions attached to an [`Error::UnknownNode`].
const MAX_SUGGESTIONS: usize = 3;

/// Opaque handle for a node, assigned in insertion order by [`Graph::add_node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Planar coordinates for a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A named point on the plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub position: Position,
}

/// Adjacency entry: the neighbour reached and the fixed cost of the edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub target: NodeId,
    pub cost: f64,
}

/// Undirected edge as reported by [`Graph::edges`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeView {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
}

impl EdgeView {
    fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Undirected weighted graph embedded in the plane.
///
/// Nodes keep their insertion order. Every edge is stored twice, once at each
/// endpoint, with the same cost. Removing a node leaves its slot empty, so
/// handles of the remaining nodes stay valid and are never reused.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Option<Node>>,
    name_to_id: HashMap<String, NodeId>,
    adjacency: Vec<Vec<Edge>>,
    edges: Vec<EdgeView>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Fails with [`Error::DuplicateNode`] when the name is taken
    /// and with [`Error::InvalidCoordinate`] when a coordinate is not finite.
    pub fn add_node(&mut self, name: impl Into<String>, x: f64, y: f64) -> Result<NodeId> {
        let name = name.into();
        if self.name_to_id.contains_key(&name) {
            return Err(Error::DuplicateNode { name });
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidCoordinate { name, x, y });
        }

        let id = NodeId(self.nodes.len());
        trace!(node = %name, x, y, "adding node");
        self.name_to_id.insert(name.clone(), id);
        self.nodes.push(Some(Node {
            id,
            name,
            position: Position { x, y },
        }));
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Connect two nodes in both directions.
    ///
    /// Both endpoints and the cost are validated before the graph is touched,
    /// so a failed call leaves no half-inserted edge behind. Parallel edges
    /// are kept; a self-loop is stored once.
    pub fn add_edge(&mut self, from: &str, to: &str, cost: f64) -> Result<()> {
        let from_id = self.resolve(from)?;
        let to_id = self.resolve(to)?;
        validate_cost(cost, || format!("edge {from}-{to}"))?;

        trace!(from, to, cost, "adding edge");
        self.adjacency[from_id.0].push(Edge {
            target: to_id,
            cost,
        });
        if from_id != to_id {
            self.adjacency[to_id.0].push(Edge {
                target: from_id,
                cost,
            });
        }
        self.edges.push(EdgeView {
            from: from_id,
            to: to_id,
            cost,
        });
        Ok(())
    }

    /// Remove every edge between `from` and `to`, returning how many
    /// undirected edges were dropped.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> Result<usize> {
        let from_id = self.resolve(from)?;
        let to_id = self.resolve(to)?;

        self.adjacency[from_id.0].retain(|edge| edge.target != to_id);
        self.adjacency[to_id.0].retain(|edge| edge.target != from_id);

        let before = self.edges.len();
        self.edges.retain(|edge| !edge.joins(from_id, to_id));
        let removed = before - self.edges.len();
        trace!(from, to, removed, "removed edges");
        Ok(removed)
    }

    /// Remove a node together with every edge touching it.
    ///
    /// The handle of the removed node becomes unknown to this graph; other
    /// handles are unaffected. Modifier tables keep the old value until
    /// [`crate::CostModifiers::forget`] is called, but it is never charged
    /// because the node can no longer be entered.
    pub fn remove_node(&mut self, name: &str) -> Result<Node> {
        let id = self.resolve(name)?;
        let node = self.nodes[id.0].take().ok_or_else(|| Error::unknown_node(name))?;
        self.name_to_id.remove(name);

        for edge in std::mem::take(&mut self.adjacency[id.0]) {
            if edge.target != id {
                self.adjacency[edge.target.0].retain(|back| back.target != id);
            }
        }
        let before = self.edges.len();
        self.edges.retain(|edge| edge.from != id && edge.to != id);
        trace!(node = name, edges = before - self.edges.len(), "removed node");
        Ok(node)
    }

    /// Drop every node and edge.
    ///
    /// Handles issued before the reset must not be used afterwards; new nodes
    /// start again at index zero.
    pub fn clear(&mut self) {
        trace!(nodes = self.len(), edges = self.edges.len(), "clearing graph");
        self.nodes.clear();
        self.name_to_id.clear();
        self.adjacency.clear();
        self.edges.clear();
    }

    /// Whether `goal` can be reached from `start` over any sequence of edges,
    /// ignoring costs.
    pub fn path_exists(&self, start: &str, goal: &str) -> Result<bool> {
        let start = self.resolve(start)?;
        let goal = self.resolve(goal)?;

        let mut visited = vec![false; self.node_bound()];
        let mut frontier = VecDeque::from([start]);
        visited[start.0] = true;
        while let Some(current) = frontier.pop_front() {
            if current == goal {
                return Ok(true);
            }
            for (next, _) in self.neighbours(current) {
                if !visited[next.0] {
                    visited[next.0] = true;
                    frontier.push_back(next);
                }
            }
        }
        Ok(false)
    }

    /// Lookup a node identifier by its case-sensitive name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a node identifier, turning absence into [`Error::UnknownNode`]
    /// with close-match suggestions.
    pub fn resolve(&self, name: &str) -> Result<NodeId> {
        self.find_node(name).ok_or_else(|| Error::UnknownNode {
            name: name.to_string(),
            suggestions: self.fuzzy_node_matches(name, MAX_SUGGESTIONS),
        })
    }

    /// Node names similar to `name`, best match first.
    pub fn fuzzy_node_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .nodes()
            .map(|node| (strsim::jaro_winkler(name, &node.name), node.name.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// Node stored under `id`, if the handle belongs to this graph.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Like [`Graph::node`] but reports an unknown handle as an error.
    pub fn require_node(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or_else(|| Error::unknown_node(id.to_string()))
    }

    /// Name of the node behind `id`.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.name.as_str())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().flatten()
    }

    /// Each undirected edge once, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeView> + '_ {
        self.edges.iter()
    }

    /// Straight-line distance between two nodes; `0.0` for foreign handles.
    ///
    /// The estimate is admissible as long as every edge costs at least the
    /// distance between its endpoints and cost modifiers are non-negative.
    /// Neither condition is enforced.
    pub fn heuristic(&self, a: NodeId, b: NodeId) -> f64 {
        match (self.node(a), self.node(b)) {
            (Some(a), Some(b)) => a.position.distance_to(&b.position),
            _ => 0.0,
        }
    }

    /// Neighbours of `node` with their edge costs. Empty for foreign handles.
    pub fn neighbours(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacency
            .get(node.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|edge| (edge.target, edge.cost))
    }

    /// Cost of the cheapest edge joining `a` and `b`.
    pub fn edge_cost(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.neighbours(a)
            .filter(|(target, _)| *target == b)
            .map(|(_, cost)| cost)
            .min_by(|x, y| x.total_cmp(y))
    }

    /// Number of nodes currently in the graph.
    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty()
    }

    /// Upper bound on node indices; removed nodes still count. Per-node
    /// tables indexed by [`NodeId::index`] need this many slots.
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Reject negative, NaN and infinite costs.
pub(crate) fn validate_cost(value: f64, subject: impl FnOnce() -> String) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidCost {
            subject: subject(),
            value,
        })
    }
}

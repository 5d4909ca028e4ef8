//! Shared fixtures for integration tests.

use weatherroute_lib::{CostModifiers, Graph, NodeId};

/// Five-node reference topology with its weather modifiers.
#[allow(dead_code)]
pub fn reference_graph() -> (Graph, CostModifiers) {
    let mut graph = Graph::new();
    for (name, x, y) in [
        ("A", 0.0, 0.0),
        ("B", 2.0, 3.0),
        ("C", 5.0, 1.0),
        ("D", 7.0, 5.0),
        ("E", 10.0, 2.0),
    ] {
        graph.add_node(name, x, y).expect("add node");
    }
    for (from, to, cost) in [
        ("A", "B", 4.0),
        ("B", "C", 2.0),
        ("C", "D", 5.0),
        ("D", "E", 3.0),
        ("B", "D", 7.0),
        ("A", "C", 6.0),
    ] {
        graph.add_edge(from, to, cost).expect("add edge");
    }
    let modifiers = CostModifiers::from_pairs(
        &graph,
        [("A", 0.0), ("B", 1.0), ("C", 3.0), ("D", 0.5), ("E", 2.0)],
    )
    .expect("modifiers");
    (graph, modifiers)
}

/// Names of the nodes in `steps`.
#[allow(dead_code)]
pub fn names(graph: &Graph, steps: &[NodeId]) -> Vec<String> {
    steps
        .iter()
        .map(|id| graph.node_name(*id).expect("known node").to_string())
        .collect()
}

/// Cost of walking `steps`: cheapest edge between each pair plus the modifier
/// of the node entered. `None` when two consecutive nodes are not adjacent.
#[allow(dead_code)]
pub fn path_cost(graph: &Graph, modifiers: &CostModifiers, steps: &[NodeId]) -> Option<f64> {
    steps.windows(2).try_fold(0.0, |total, pair| {
        graph
            .edge_cost(pair[0], pair[1])
            .map(|cost| total + cost + modifiers.get(pair[1]))
    })
}

/// Cheapest cost over every simple path from `start` to `goal`, found by
/// exhaustive depth-first enumeration.
#[allow(dead_code)]
pub fn brute_force_cost(
    graph: &Graph,
    modifiers: &CostModifiers,
    start: NodeId,
    goal: NodeId,
) -> Option<f64> {
    fn walk(
        graph: &Graph,
        modifiers: &CostModifiers,
        current: NodeId,
        goal: NodeId,
        cost: f64,
        visited: &mut Vec<bool>,
        best: &mut Option<f64>,
    ) {
        if current == goal {
            if best.map_or(true, |b| cost < b) {
                *best = Some(cost);
            }
            return;
        }
        let neighbours: Vec<(NodeId, f64)> = graph.neighbours(current).collect();
        for (next, edge) in neighbours {
            if visited[next.index()] {
                continue;
            }
            visited[next.index()] = true;
            let step = edge + modifiers.get(next);
            walk(graph, modifiers, next, goal, cost + step, visited, best);
            visited[next.index()] = false;
        }
    }

    let mut visited = vec![false; graph.node_bound()];
    visited[start.index()] = true;
    let mut best = None;
    walk(graph, modifiers, start, goal, 0.0, &mut visited, &mut best);
    best
}

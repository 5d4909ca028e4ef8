mod common;

use weatherroute_lib::{
    find_path, CostModifiers, Error, Graph, NodeId, PathFinder, PathResult, QueueStrategy,
    SearchOptions,
};

use common::{names, path_cost, reference_graph};

fn all_options() -> Vec<SearchOptions> {
    vec![
        SearchOptions::default(),
        SearchOptions {
            skip_stale_entries: true,
            ..SearchOptions::default()
        },
        SearchOptions::default().with_strategy(QueueStrategy::DecreaseKey),
    ]
}

#[test]
fn reference_route_goes_through_b_and_d() {
    let (graph, modifiers) = reference_graph();
    for options in all_options() {
        let route = PathFinder::new(options)
            .find_path(&graph, "A", "E", &modifiers)
            .expect("search runs")
            .into_route()
            .expect("route exists");

        assert_eq!(names(&graph, &route.steps), vec!["A", "B", "D", "E"]);
        assert!((route.total_cost - 17.5).abs() < 1e-9, "{options:?}");
        assert_eq!(route.hop_count(), 3);
    }
}

#[test]
fn total_cost_matches_sum_of_legs() {
    let (graph, modifiers) = reference_graph();
    let route = find_path(&graph, "A", "E", &modifiers)
        .unwrap()
        .into_route()
        .unwrap();

    let legs = route.legs(&graph, &modifiers).unwrap();
    let summed: f64 = legs.iter().map(|leg| leg.cost).sum();
    assert!((summed - route.total_cost).abs() < 1e-9);
    assert_eq!(
        path_cost(&graph, &modifiers, &route.steps),
        Some(route.total_cost)
    );

    assert_eq!(legs[0].from, "A");
    assert_eq!(legs[0].to, "B");
    assert_eq!(legs[0].edge_cost, 4.0);
    assert_eq!(legs[0].modifier, 1.0);
    assert_eq!(legs[1].modifier, 0.5);
    assert_eq!(legs[2].cost, 5.0);
}

#[test]
fn start_modifier_is_never_charged() {
    let (graph, _) = reference_graph();
    let modifiers = CostModifiers::from_pairs(&graph, [("A", 100.0), ("B", 1.0)]).unwrap();
    let route = find_path(&graph, "A", "B", &modifiers)
        .unwrap()
        .into_route()
        .unwrap();
    assert_eq!(route.total_cost, 5.0);
}

#[test]
fn modifier_is_charged_on_entry_in_either_direction() {
    let (graph, modifiers) = reference_graph();
    let forward = find_path(&graph, "A", "B", &modifiers)
        .unwrap()
        .into_route()
        .unwrap();
    let backward = find_path(&graph, "B", "A", &modifiers)
        .unwrap()
        .into_route()
        .unwrap();
    assert_eq!(forward.total_cost, 4.0 + 1.0);
    assert_eq!(backward.total_cost, 4.0 + 0.0);
}

#[test]
fn heavy_weather_reroutes() {
    let (graph, _) = reference_graph();
    let modifiers = CostModifiers::from_pairs(&graph, [("B", 20.0)]).unwrap();
    let route = find_path(&graph, "A", "E", &modifiers)
        .unwrap()
        .into_route()
        .unwrap();
    assert_eq!(names(&graph, &route.steps), vec!["A", "C", "D", "E"]);
    assert_eq!(route.total_cost, 6.0 + 5.0 + 3.0);
}

#[test]
fn start_equals_goal_yields_single_node_path() {
    let (graph, modifiers) = reference_graph();
    for options in all_options() {
        let result = PathFinder::new(options)
            .find_path(&graph, "C", "C", &modifiers)
            .unwrap();
        let route = result.route().expect("trivial route");
        assert_eq!(names(&graph, &route.steps), vec!["C"]);
        assert_eq!(route.total_cost, 0.0);
        assert_eq!(route.hop_count(), 0);
    }
}

#[test]
fn disconnected_goal_reports_no_path() {
    let (mut graph, _) = reference_graph();
    graph.add_node("F", 20.0, 20.0).unwrap();
    graph.add_node("G", 21.0, 20.0).unwrap();
    graph.add_edge("F", "G", 1.0).unwrap();
    let modifiers = CostModifiers::new(&graph);

    for options in all_options() {
        let result = PathFinder::new(options)
            .find_path(&graph, "A", "G", &modifiers)
            .unwrap();
        match &result {
            PathResult::NoPath { start, goal, stats } => {
                assert_eq!(start, "A");
                assert_eq!(goal, "G");
                assert_eq!(stats.expansions, 5, "whole component explored");
            }
            PathResult::Found(route) => panic!("unexpected route {route:?}"),
        }
        assert!(matches!(
            result.into_route(),
            Err(Error::RouteNotFound { .. })
        ));
    }
}

#[test]
fn unknown_start_or_goal_is_rejected() {
    let (graph, modifiers) = reference_graph();
    assert!(matches!(
        find_path(&graph, "Q", "E", &modifiers),
        Err(Error::UnknownNode { ref name, .. }) if name == "Q"
    ));
    assert!(matches!(
        find_path(&graph, "A", "Q", &modifiers),
        Err(Error::UnknownNode { ref name, .. }) if name == "Q"
    ));
}

#[test]
fn foreign_node_handle_is_rejected() {
    let (graph, modifiers) = reference_graph();
    let mut bigger = Graph::new();
    for i in 0..8 {
        bigger.add_node(format!("N{i}"), i as f64, 0.0).unwrap();
    }
    let foreign: NodeId = bigger.find_node("N7").unwrap();
    let start = graph.find_node("A").unwrap();

    let error = PathFinder::default()
        .find_path_between(
            &graph,
            start,
            foreign,
            &modifiers,
            &mut weatherroute_lib::NoopObserver,
        )
        .unwrap_err();
    assert!(matches!(error, Error::UnknownNode { .. }));
}

#[test]
fn expansion_limit_aborts_search() {
    let (graph, modifiers) = reference_graph();
    let finder = PathFinder::new(SearchOptions::default().with_max_expansions(2));
    let error = finder.find_path(&graph, "A", "E", &modifiers).unwrap_err();
    assert!(matches!(error, Error::SearchLimitExceeded { limit: 2 }));

    let generous = PathFinder::new(SearchOptions::default().with_max_expansions(50));
    assert!(generous
        .find_path(&graph, "A", "E", &modifiers)
        .unwrap()
        .is_found());
}

#[test]
fn expansion_limit_does_not_mask_exhausted_search() {
    let mut graph = Graph::new();
    graph.add_node("A", 0.0, 0.0).unwrap();
    graph.add_node("B", 5.0, 0.0).unwrap();
    let modifiers = CostModifiers::new(&graph);

    for options in all_options() {
        let result = PathFinder::new(options.with_max_expansions(1))
            .find_path(&graph, "A", "B", &modifiers)
            .unwrap();
        assert!(
            matches!(result, PathResult::NoPath { ref stats, .. } if stats.expansions == 1),
            "{options:?}: {result:?}"
        );
    }
}

#[test]
fn route_avoids_removed_node() {
    let (mut graph, mut modifiers) = reference_graph();
    let removed = graph.remove_node("B").unwrap();
    modifiers.forget(removed.id);

    for options in all_options() {
        let route = PathFinder::new(options)
            .find_path(&graph, "A", "E", &modifiers)
            .unwrap()
            .into_route()
            .unwrap();
        assert_eq!(names(&graph, &route.steps), vec!["A", "C", "D", "E"]);
        assert_eq!(
            path_cost(&graph, &modifiers, &route.steps),
            Some(route.total_cost)
        );
    }

    let error = find_path(&graph, "B", "E", &modifiers).unwrap_err();
    assert!(matches!(error, Error::UnknownNode { .. }));
}

#[test]
fn describe_renders_edge_costs() {
    let (graph, modifiers) = reference_graph();
    let route = find_path(&graph, "A", "E", &modifiers)
        .unwrap()
        .into_route()
        .unwrap();
    assert_eq!(
        route.describe(&graph).unwrap(),
        "A -(4.0)-> B -(7.0)-> D -(3.0)-> E"
    );
}

#[test]
fn removing_an_edge_changes_the_route() {
    let (mut graph, modifiers) = reference_graph();
    graph.remove_edge("B", "D").unwrap();
    let route = find_path(&graph, "A", "E", &modifiers)
        .unwrap()
        .into_route()
        .unwrap();
    assert_eq!(names(&graph, &route.steps), vec!["A", "C", "D", "E"]);
    assert!((route.total_cost - 19.5).abs() < 1e-9);
}

#[test]
fn graph_is_shareable_across_threads() {
    let (graph, modifiers) = reference_graph();
    std::thread::scope(|scope| {
        let handles: Vec<_> = all_options()
            .into_iter()
            .map(|options| {
                let graph = &graph;
                let modifiers = &modifiers;
                scope.spawn(move || {
                    PathFinder::new(options)
                        .find_path(graph, "A", "E", modifiers)
                        .unwrap()
                        .into_route()
                        .unwrap()
                        .total_cost
                })
            })
            .collect();
        for handle in handles {
            assert!((handle.join().unwrap() - 17.5).abs() < 1e-9);
        }
    });
}

#[test]
fn path_result_serializes_with_outcome_tag() {
    let (graph, modifiers) = reference_graph();
    let result = find_path(&graph, "A", "E", &modifiers).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["outcome"], "found");
    assert_eq!(json["steps"], serde_json::json!([0, 1, 3, 4]));
}

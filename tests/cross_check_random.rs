//! Randomized cross-algorithm agreement checks.
//!
//! Floyd-Warshall's all-pairs matrix is the oracle for Dijkstra and vice
//! versa: on every generated graph, every pair must get the same shortest
//! distance from both engines.

use pathsteps::algorithms::dijkstra::{self, DijkstraStep};
use pathsteps::algorithms::floyd_warshall::{self, FloydWarshallStep};
use pathsteps::{compare, Graph, Position};
use proptest::prelude::*;

/// Random undirected graph: 2..=7 nodes named `1..=n`, each unordered pair
/// independently present with an integer weight 1..=10.
fn arb_graph() -> impl Strategy<Value = Graph> {
    (2usize..=7).prop_flat_map(|n| {
        let pairs = n * (n - 1) / 2;
        prop::collection::vec((any::<bool>(), 1u32..=10), pairs).prop_map(move |toggles| {
            let names: Vec<String> = (1..=n).map(|i| i.to_string()).collect();
            let mut graph = Graph::new();
            for name in &names {
                graph
                    .add_node(name.clone(), Position::default())
                    .expect("generated ids are unique");
            }
            let mut idx = 0;
            for i in 0..n {
                for j in i + 1..n {
                    let (present, weight) = toggles[idx];
                    idx += 1;
                    if present {
                        graph
                            .add_edge(&names[i], &names[j], f64::from(weight))
                            .expect("generated edges are valid");
                    }
                }
            }
            graph
        })
    })
}

fn dijkstra_final(steps: &[DijkstraStep]) -> (&Vec<String>, f64) {
    match steps.last() {
        Some(DijkstraStep::Final { path, distance, .. }) => (path, *distance),
        other => panic!("expected a final step, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn engines_agree_on_every_pair(graph in arb_graph()) {
        let fw_steps = floyd_warshall::run(&graph, None);
        let Some(FloydWarshallStep::Final { distances, node_order, .. }) = fw_steps.last() else {
            panic!("missing final step");
        };

        for (i, source) in node_order.iter().enumerate() {
            for (j, dest) in node_order.iter().enumerate() {
                let steps = dijkstra::run(&graph, source, dest);
                let (path, distance) = dijkstra_final(&steps);
                prop_assert_eq!(
                    distance,
                    distances[i][j],
                    "disagreement for pair ({}, {})",
                    source,
                    dest
                );
                if distance.is_infinite() {
                    prop_assert!(path.is_empty());
                } else if source == dest {
                    prop_assert_eq!(path.len(), 1);
                } else {
                    prop_assert_eq!(path.first().map(String::as_str), Some(source.as_str()));
                    prop_assert_eq!(path.last().map(String::as_str), Some(dest.as_str()));
                }
            }
        }
    }

    #[test]
    fn comparison_always_reports_agreement(graph in arb_graph()) {
        let last = graph.nodes.len().to_string();
        let result = compare(&graph, "1", &last);
        prop_assert!(result.agreement, "{:?}", result.warning());
        prop_assert_eq!(result.dijkstra.steps, dijkstra::run(&graph, "1", &last).len());
    }

    #[test]
    fn reconstructed_paths_cost_what_they_claim(graph in arb_graph()) {
        let last = graph.nodes.len().to_string();
        let steps = dijkstra::run(&graph, "1", &last);
        let (path, distance) = dijkstra_final(&steps);
        if distance.is_finite() && path.len() > 1 {
            let total: f64 = path
                .windows(2)
                .map(|pair| {
                    graph
                        .edge_between(&pair[0], &pair[1])
                        .expect("path edge must exist")
                        .weight
                })
                .sum();
            prop_assert_eq!(total, distance);
        }
    }
}

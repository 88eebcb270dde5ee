//! Single-pair Dijkstra emitting a replayable step sequence.
//!
//! Non-negative weights only. The run exits its main loop as soon as the
//! destination is dequeued, so distances to nodes "beyond" the destination
//! are not guaranteed final; this is intentional single-pair scope, not a
//! defect. Callers needing full single-source distances should not rely on
//! the trailing table entries.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeId, EdgeState, Graph, NodeId, NodeState};
use crate::heap::MinQueue;
use crate::step::{display_distance, Snapshot, StepKind, StepRecord};

/// Best known distance per node, `∞` until reached. Once a node is marked
/// visited its entry never changes in any later step.
pub type DistanceTable = BTreeMap<NodeId, f64>;

/// One step of a Dijkstra run. Every variant carries a full snapshot and the
/// full distance table at that instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DijkstraStep {
    /// Distances initialized: source at 0, everything else at `∞`.
    Init {
        description: String,
        snapshot: Snapshot,
        source: NodeId,
        distances: DistanceTable,
    },
    /// The unvisited node with minimum distance was extracted and finalized.
    Selection {
        description: String,
        snapshot: Snapshot,
        current: NodeId,
        distances: DistanceTable,
    },
    /// An edge relaxation improved a neighbor's best known distance.
    Update {
        description: String,
        snapshot: Snapshot,
        current: NodeId,
        target: NodeId,
        relaxed_edge: EdgeId,
        distances: DistanceTable,
    },
    /// Terminal step: reconstructed path highlighted, or empty on
    /// unreachability (check `distance.is_infinite()`).
    Final {
        description: String,
        snapshot: Snapshot,
        path: Vec<NodeId>,
        distance: f64,
        distances: DistanceTable,
    },
}

impl StepRecord for DijkstraStep {
    fn kind(&self) -> StepKind {
        match self {
            DijkstraStep::Init { .. } => StepKind::Init,
            DijkstraStep::Selection { .. } => StepKind::Selection,
            DijkstraStep::Update { .. } => StepKind::Update,
            DijkstraStep::Final { .. } => StepKind::Final,
        }
    }

    fn description(&self) -> &str {
        match self {
            DijkstraStep::Init { description, .. }
            | DijkstraStep::Selection { description, .. }
            | DijkstraStep::Update { description, .. }
            | DijkstraStep::Final { description, .. } => description,
        }
    }

    fn snapshot(&self) -> &Snapshot {
        match self {
            DijkstraStep::Init { snapshot, .. }
            | DijkstraStep::Selection { snapshot, .. }
            | DijkstraStep::Update { snapshot, .. }
            | DijkstraStep::Final { snapshot, .. } => snapshot,
        }
    }
}

/// Run Dijkstra from `source` to `dest`, materializing the full step
/// sequence.
///
/// Precondition: both ids name nodes of `graph`. This is not validated; an
/// unknown id degrades to an all-`∞` table and an unreachable result rather
/// than a panic.
pub fn run(graph: &Graph, source: &str, dest: &str) -> Vec<DijkstraStep> {
    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!("dijkstra_run", source, dest);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let adjacency = graph.adjacency();
    let mut distances: DistanceTable = graph
        .nodes
        .iter()
        .map(|n| {
            let d = if n.id == source { 0.0 } else { f64::INFINITY };
            (n.id.clone(), d)
        })
        .collect();
    let mut previous: HashMap<NodeId, NodeId> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: MinQueue<NodeId> = MinQueue::new();
    queue.push(source.to_owned(), 0.0);

    let mut steps = Vec::new();

    let table = distances.clone();
    steps.push(DijkstraStep::Init {
        description: format!(
            "Initialized distances. Source node {source} has distance 0, \
             all others have distance ∞."
        ),
        snapshot: Snapshot::annotate(
            graph,
            |n| {
                let state = if n.id == source {
                    NodeState::Visiting
                } else {
                    NodeState::Unvisited
                };
                (lookup(&table, &n.id), state)
            },
            |_| EdgeState::Default,
        ),
        source: source.to_owned(),
        distances: table,
    });

    while let Some((current, _)) = queue.pop() {
        // With true decrease-key there are no stale duplicates, but a
        // finalized entry is still skipped without emitting a step.
        if !visited.insert(current.clone()) {
            continue;
        }

        let current_dist = lookup(&distances, &current);
        let table = distances.clone();
        steps.push(DijkstraStep::Selection {
            description: format!(
                "Selected Node {current} (Minimum Distance: {})",
                display_distance(current_dist)
            ),
            snapshot: Snapshot::annotate(
                graph,
                |n| {
                    let state = if visited.contains(&n.id) {
                        NodeState::Visited
                    } else if n.id == current {
                        NodeState::Visiting
                    } else {
                        NodeState::Unvisited
                    };
                    (lookup(&table, &n.id), state)
                },
                |_| EdgeState::Default,
            ),
            current: current.clone(),
            distances: table,
        });

        // Early exit: distances beyond the destination stay provisional.
        if current == dest {
            break;
        }

        let Some(neighbors) = adjacency.get(&current) else {
            continue;
        };
        for neighbor in neighbors {
            if visited.contains(&neighbor.node) {
                continue;
            }
            let candidate = current_dist + neighbor.weight;
            let old = lookup(&distances, &neighbor.node);
            if candidate < old {
                distances.insert(neighbor.node.clone(), candidate);
                previous.insert(neighbor.node.clone(), current.clone());
                if !queue.decrease_key(&neighbor.node, candidate) {
                    queue.push(neighbor.node.clone(), candidate);
                }

                let table = distances.clone();
                steps.push(DijkstraStep::Update {
                    description: format!(
                        "Updated Node {target}: dist[{target}] = min({old}, {cur} + {w}) = {new}",
                        target = neighbor.node,
                        old = display_distance(old),
                        cur = display_distance(current_dist),
                        w = display_distance(neighbor.weight),
                        new = display_distance(candidate),
                    ),
                    snapshot: Snapshot::annotate(
                        graph,
                        |n| {
                            let state = if n.id == neighbor.node {
                                NodeState::Visiting
                            } else if visited.contains(&n.id) {
                                NodeState::Visited
                            } else {
                                NodeState::Unvisited
                            };
                            (lookup(&table, &n.id), state)
                        },
                        |e| {
                            if e.id == neighbor.edge {
                                EdgeState::Relaxing
                            } else {
                                EdgeState::Default
                            }
                        },
                    ),
                    current: current.clone(),
                    target: neighbor.node.clone(),
                    relaxed_edge: neighbor.edge.clone(),
                    distances: table,
                });
            }
        }
    }

    let distance = lookup(&distances, dest);
    let path = if distance.is_infinite() {
        Vec::new()
    } else {
        walk_back(&previous, source, dest)
    };

    let path_edges: HashSet<&EdgeId> = path
        .windows(2)
        .filter_map(|pair| graph.edge_between(&pair[0], &pair[1]).map(|e| &e.id))
        .collect();

    let description = if distance.is_infinite() {
        format!("No path found from {source} to {dest}: distance remains ∞.")
    } else {
        format!(
            "Shortest path found: {} with total distance {}",
            path.join(" → "),
            display_distance(distance)
        )
    };

    let table = distances.clone();
    steps.push(DijkstraStep::Final {
        description,
        snapshot: Snapshot::annotate(
            graph,
            |n| {
                let state = if path.contains(&n.id) {
                    NodeState::Path
                } else {
                    NodeState::Visited
                };
                (lookup(&table, &n.id), state)
            },
            |e| {
                if path_edges.contains(&e.id) {
                    EdgeState::Path
                } else {
                    EdgeState::Default
                }
            },
        ),
        path,
        distance,
        distances: table,
    });

    steps
}

fn lookup(table: &DistanceTable, id: &str) -> f64 {
    table.get(id).copied().unwrap_or(f64::INFINITY)
}

fn walk_back(previous: &HashMap<NodeId, NodeId>, source: &str, dest: &str) -> Vec<NodeId> {
    let mut path = vec![dest.to_owned()];
    let mut current = dest;
    while current != source {
        match previous.get(current) {
            Some(prev) => {
                path.push(prev.clone());
                current = prev.as_str();
            }
            // Broken predecessor chain: unreachable, reported by the caller
            // through the infinite distance.
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn triangle() -> Graph {
        Graph::from_parts(
            &["A", "B", "C"],
            &[("A", "B", 4.0), ("B", "C", 3.0), ("A", "C", 10.0)],
        )
        .unwrap()
    }

    #[test]
    fn first_step_is_init_last_is_final() {
        let steps = run(&triangle(), "A", "C");
        assert!(matches!(steps.first(), Some(DijkstraStep::Init { .. })));
        assert!(matches!(steps.last(), Some(DijkstraStep::Final { .. })));
    }

    #[test]
    fn triangle_route_goes_through_b() {
        let steps = run(&triangle(), "A", "C");
        let Some(DijkstraStep::Final { path, distance, .. }) = steps.last() else {
            panic!("missing final step");
        };
        assert_eq!(path, &["A", "B", "C"]);
        assert_eq!(*distance, 7.0);
    }

    #[test]
    fn update_steps_mark_relaxing_edge() {
        let steps = run(&triangle(), "A", "C");
        let updates: Vec<_> = steps
            .iter()
            .filter_map(|s| match s {
                DijkstraStep::Update {
                    snapshot,
                    relaxed_edge,
                    ..
                } => Some((snapshot, relaxed_edge)),
                _ => None,
            })
            .collect();
        assert!(!updates.is_empty());
        for (snapshot, relaxed_edge) in updates {
            let relaxing: Vec<_> = snapshot
                .edges
                .iter()
                .filter(|e| e.state == EdgeState::Relaxing)
                .collect();
            assert_eq!(relaxing.len(), 1);
            assert_eq!(&relaxing[0].id, relaxed_edge);
        }
    }

    #[test]
    fn source_equals_dest_is_three_steps() {
        let steps = run(&triangle(), "A", "A");
        assert_eq!(steps.len(), 3);
        let Some(DijkstraStep::Final { path, distance, .. }) = steps.last() else {
            panic!("missing final step");
        };
        assert_eq!(path, &["A"]);
        assert_eq!(*distance, 0.0);
    }

    #[test]
    fn unreachable_dest_reports_infinity_and_empty_path() {
        let mut graph = triangle();
        graph.add_node("D", Default::default()).unwrap();
        let steps = run(&graph, "A", "D");
        let Some(DijkstraStep::Final { path, distance, description, .. }) = steps.last() else {
            panic!("missing final step");
        };
        assert!(path.is_empty());
        assert!(distance.is_infinite());
        assert!(description.contains('∞'));
    }
}

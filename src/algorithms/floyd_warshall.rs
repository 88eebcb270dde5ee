//! All-pairs Floyd-Warshall emitting the full D-matrix history.
//!
//! The engine indexes nodes into a dense `[0, n)` range in insertion order
//! and carries that order on the final step so consumers can index into the
//! raw matrices. Unreachable pairs hold `∞`; since `∞ + finite = ∞` and
//! comparisons against `∞` never pass the improvement test, they stay stable
//! across iterations.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeId, EdgeState, Graph, NodeId, NodeState};
use crate::step::{display_distance, Snapshot, StepKind, StepRecord};

/// Square distance matrix, indexed by the node order of the run.
pub type Matrix = Vec<Vec<f64>>;

/// Path-reconstruction pointers: `next[i][j]` is the next hop from `i`
/// toward `j`, or `None` when no path is known.
pub type NextMatrix = Vec<Vec<Option<usize>>>;

/// One matrix of the `D⁰..Dⁿ` sequence, with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledMatrix {
    /// Iteration that produced this matrix; `None` for the initial `D⁰`.
    pub k: Option<usize>,
    pub label: String,
    pub matrix: Matrix,
    pub description: String,
    /// Intermediate vertex of the iteration, absent for `D⁰`.
    pub intermediate: Option<NodeId>,
    /// Pivot row index `k`, absent for `D⁰`.
    pub pivot_row: Option<usize>,
    /// Pivot column index `k`, absent for `D⁰`.
    pub pivot_col: Option<usize>,
}

/// Reconstructed single-pair result carried on the final step when the run
/// was given endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathQuery {
    pub source: NodeId,
    pub dest: NodeId,
    pub distance: f64,
    /// Node ids along the path; empty when the pair is unreachable.
    pub path: Vec<NodeId>,
}

/// One step of a Floyd-Warshall run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FloydWarshallStep {
    /// Raw graph plus the initial matrix `D⁰`.
    Init {
        description: String,
        snapshot: Snapshot,
        matrix: LabeledMatrix,
    },
    /// Iteration `k` completed: all pairs relaxed through one intermediate
    /// vertex, yielding `Dᵏ⁺¹`.
    Iteration {
        description: String,
        snapshot: Snapshot,
        k: usize,
        intermediate: NodeId,
        matrix: LabeledMatrix,
        /// All matrices produced so far, `D⁰..Dᵏ⁺¹`.
        history: Vec<LabeledMatrix>,
    },
    /// Terminal step with the complete matrix history and, when endpoints
    /// were supplied, the reconstructed path.
    Final {
        description: String,
        snapshot: Snapshot,
        history: Vec<LabeledMatrix>,
        distances: Matrix,
        next: NextMatrix,
        /// Node id for each dense matrix index, in run order.
        node_order: Vec<NodeId>,
        query: Option<PathQuery>,
    },
}

impl StepRecord for FloydWarshallStep {
    fn kind(&self) -> StepKind {
        match self {
            FloydWarshallStep::Init { .. } => StepKind::Init,
            // Each completed iteration is the update-equivalent step.
            FloydWarshallStep::Iteration { .. } => StepKind::Update,
            FloydWarshallStep::Final { .. } => StepKind::Final,
        }
    }

    fn description(&self) -> &str {
        match self {
            FloydWarshallStep::Init { description, .. }
            | FloydWarshallStep::Iteration { description, .. }
            | FloydWarshallStep::Final { description, .. } => description,
        }
    }

    fn snapshot(&self) -> &Snapshot {
        match self {
            FloydWarshallStep::Init { snapshot, .. }
            | FloydWarshallStep::Iteration { snapshot, .. }
            | FloydWarshallStep::Final { snapshot, .. } => snapshot,
        }
    }
}

/// Run Floyd-Warshall over the whole graph. When `endpoints` is given, the
/// final step also carries and highlights the reconstructed path for that
/// pair; all-pairs distances are computed either way.
///
/// Precondition: endpoint ids, when supplied, name nodes of `graph`; unknown
/// ids yield an unreachable query result rather than a panic.
pub fn run(graph: &Graph, endpoints: Option<(&str, &str)>) -> Vec<FloydWarshallStep> {
    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!("floyd_warshall_run", nodes = graph.nodes.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let n = graph.nodes.len();
    let node_order: Vec<NodeId> = graph.nodes.iter().map(|node| node.id.clone()).collect();
    let index: HashMap<&str, usize> = node_order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut dist: Matrix = vec![vec![f64::INFINITY; n]; n];
    let mut next: NextMatrix = vec![vec![None; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    for edge in &graph.edges {
        let (Some(&u), Some(&v)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        else {
            continue;
        };
        dist[u][v] = edge.weight;
        next[u][v] = Some(v);
        // Undirected: mirror the entry.
        dist[v][u] = edge.weight;
        next[v][u] = Some(u);
    }

    let mut history = vec![LabeledMatrix {
        k: None,
        label: "D⁰ (Initial)".to_owned(),
        matrix: dist.clone(),
        description: "Initial distance matrix with direct edge weights".to_owned(),
        intermediate: None,
        pivot_row: None,
        pivot_col: None,
    }];

    let mut steps = Vec::new();
    steps.push(FloydWarshallStep::Init {
        description: "Initial graph state".to_owned(),
        snapshot: Snapshot::annotate(
            graph,
            |_| (f64::INFINITY, NodeState::Unvisited),
            |_| EdgeState::Default,
        ),
        matrix: history[0].clone(),
    });

    for k in 0..n {
        let intermediate = node_order[k].clone();
        for i in 0..n {
            for j in 0..n {
                let via = dist[i][k] + dist[k][j];
                if via < dist[i][j] {
                    dist[i][j] = via;
                    next[i][j] = next[i][k];
                }
            }
        }

        history.push(LabeledMatrix {
            k: Some(k),
            label: format!("D{} (via vertex {intermediate})", k + 1),
            matrix: dist.clone(),
            description: format!("Using vertex {intermediate} as intermediate vertex"),
            intermediate: Some(intermediate.clone()),
            pivot_row: Some(k),
            pivot_col: Some(k),
        });

        steps.push(FloydWarshallStep::Iteration {
            description: format!(
                "Iteration {}: Using vertex {intermediate} as intermediate",
                k + 1
            ),
            snapshot: Snapshot::annotate(
                graph,
                |node| {
                    let state = if node.id == intermediate {
                        NodeState::Processing
                    } else {
                        NodeState::Visited
                    };
                    (0.0, state)
                },
                |_| EdgeState::Visited,
            ),
            k,
            intermediate,
            matrix: history[history.len() - 1].clone(),
            history: history.clone(),
        });
    }

    let query = endpoints.map(|(source, dest)| {
        let path = match (index.get(source), index.get(dest)) {
            (Some(&s), Some(&d)) => reconstruct(&next, &node_order, s, d),
            _ => Vec::new(),
        };
        let distance = match (index.get(source), index.get(dest)) {
            (Some(&s), Some(&d)) => dist[s][d],
            _ => f64::INFINITY,
        };
        PathQuery {
            source: source.to_owned(),
            dest: dest.to_owned(),
            distance,
            path,
        }
    });

    let (description, path, query_distance) = match &query {
        Some(q) if q.path.is_empty() => (
            format!(
                "No path from {} to {}: distance is ∞",
                q.source, q.dest
            ),
            Vec::new(),
            f64::INFINITY,
        ),
        Some(q) => (
            format!(
                "Shortest path from {} to {}: {} (Distance: {})",
                q.source,
                q.dest,
                q.path.join(" → "),
                display_distance(q.distance)
            ),
            q.path.clone(),
            q.distance,
        ),
        None => ("All-pairs shortest paths computed".to_owned(), Vec::new(), 0.0),
    };

    let path_edges: HashSet<&EdgeId> = path
        .windows(2)
        .filter_map(|pair| graph.edge_between(&pair[0], &pair[1]).map(|e| &e.id))
        .collect();
    let (source_id, dest_id) = match &query {
        Some(q) => (Some(q.source.as_str()), Some(q.dest.as_str())),
        None => (None, None),
    };

    steps.push(FloydWarshallStep::Final {
        description,
        snapshot: Snapshot::annotate(
            graph,
            |node| {
                let state = if path.contains(&node.id) {
                    NodeState::Path
                } else {
                    NodeState::Visited
                };
                let distance = if Some(node.id.as_str()) == dest_id
                    && Some(node.id.as_str()) != source_id
                {
                    query_distance
                } else {
                    0.0
                };
                (distance, state)
            },
            |e| {
                if path_edges.contains(&e.id) {
                    EdgeState::Path
                } else {
                    EdgeState::Default
                }
            },
        ),
        history,
        distances: dist,
        next,
        node_order,
        query,
    });

    steps
}

/// Walk `next` pointers from `source` to `dest`. Returns the id path, or an
/// empty path when the pair is unreachable. A pair with `source == dest` is
/// the single-node path.
fn reconstruct(next: &NextMatrix, node_order: &[NodeId], source: usize, dest: usize) -> Vec<NodeId> {
    if source == dest {
        return vec![node_order[source].clone()];
    }
    if next[source][dest].is_none() {
        return Vec::new();
    }
    let mut path = vec![node_order[source].clone()];
    let mut current = source;
    while current != dest {
        match next[current][dest] {
            Some(hop) => {
                current = hop;
                path.push(node_order[current].clone());
            }
            None => return Vec::new(),
        }
    }
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

    fn final_step(steps: &[FloydWarshallStep]) -> &FloydWarshallStep {
        steps.last().expect("run always emits a final step")
    }

    #[test]
    fn emits_n_plus_two_steps() {
        // INIT + one iteration per vertex + FINAL.
        let steps = run(&triangle(), None);
        assert_eq!(steps.len(), 3 + 2);
    }

    #[test]
    fn initial_matrix_has_zero_diagonal_and_edge_weights() {
        let steps = run(&triangle(), None);
        let FloydWarshallStep::Init { matrix, .. } = &steps[0] else {
            panic!("first step must be INIT");
        };
        assert_eq!(matrix.matrix[0][0], 0.0);
        assert_eq!(matrix.matrix[0][1], 4.0);
        assert_eq!(matrix.matrix[1][2], 3.0);
        assert_eq!(matrix.matrix[0][2], 10.0);
    }

    #[test]
    fn triangle_shortcut_is_found() {
        let steps = run(&triangle(), Some(("A", "C")));
        let FloydWarshallStep::Final { distances, query, .. } = final_step(&steps) else {
            panic!("missing final step");
        };
        assert_eq!(distances[0][2], 7.0);
        let query = query.as_ref().expect("endpoints were supplied");
        assert_eq!(query.path, vec!["A", "B", "C"]);
        assert_eq!(query.distance, 7.0);
    }

    #[test]
    fn iteration_marks_intermediate_as_processing() {
        let steps = run(&triangle(), None);
        let FloydWarshallStep::Iteration { snapshot, intermediate, matrix, .. } = &steps[1]
        else {
            panic!("second step must be an iteration");
        };
        assert_eq!(matrix.pivot_row, Some(0));
        assert_eq!(matrix.pivot_col, Some(0));
        let processing: Vec<_> = snapshot
            .nodes
            .iter()
            .filter(|n| n.state == NodeState::Processing)
            .collect();
        assert_eq!(processing.len(), 1);
        assert_eq!(&processing[0].id, intermediate);
    }

    #[test]
    fn without_endpoints_no_query_and_no_highlight() {
        let steps = run(&triangle(), None);
        let FloydWarshallStep::Final { query, snapshot, .. } = final_step(&steps) else {
            panic!("missing final step");
        };
        assert!(query.is_none());
        assert!(snapshot.edges.iter().all(|e| e.state == EdgeState::Default));
        assert!(snapshot.nodes.iter().all(|n| n.state == NodeState::Visited));
    }

    #[test]
    fn disconnected_pair_is_unreachable() {
        let mut graph = triangle();
        graph.add_node("D", Default::default()).unwrap();
        let steps = run(&graph, Some(("A", "D")));
        let FloydWarshallStep::Final { query, .. } = final_step(&steps) else {
            panic!("missing final step");
        };
        let query = query.as_ref().unwrap();
        assert!(query.distance.is_infinite());
        assert!(query.path.is_empty());
    }

    #[test]
    fn source_equals_dest_is_single_node_path() {
        let steps = run(&triangle(), Some(("B", "B")));
        let FloydWarshallStep::Final { query, .. } = final_step(&steps) else {
            panic!("missing final step");
        };
        let query = query.as_ref().unwrap();
        assert_eq!(query.distance, 0.0);
        assert_eq!(query.path, vec!["B"]);
    }
}

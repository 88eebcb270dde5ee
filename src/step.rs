//! Step records: the contract between the engines and their consumers.
//!
//! Each engine emits an ordered sequence of steps, and every step carries a
//! complete annotated [`Snapshot`] of the graph. Replaying step `k` alone is
//! sufficient to render the graph at that instant; no step depends on state
//! outside itself.
//!
//! The two engines have different payloads (a distance table vs. a matrix
//! history), so each defines its own step enum with a fixed field set per
//! variant. [`StepRecord`] is the cross-engine seam the player, renderer and
//! comparison runner work against.

use serde::{Deserialize, Serialize};

use crate::graph::{Edge, EdgeState, Graph, Node, NodeState};

/// Cross-engine classification of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    Init,
    Selection,
    Update,
    Final,
}

/// A complete annotated copy of the graph at one instant.
///
/// Consumers treat snapshots as read-only render models; the engines never
/// hand out references into the input graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Snapshot {
    /// Copy the graph, annotating every node and edge through the supplied
    /// closures. This is the only way engines produce snapshots, which keeps
    /// the input graph untouched by construction.
    pub fn annotate<N, E>(graph: &Graph, mut node_fn: N, mut edge_fn: E) -> Self
    where
        N: FnMut(&Node) -> (f64, NodeState),
        E: FnMut(&Edge) -> EdgeState,
    {
        let nodes = graph
            .nodes
            .iter()
            .map(|n| {
                let (distance, state) = node_fn(n);
                Node {
                    distance,
                    state,
                    ..n.clone()
                }
            })
            .collect();
        let edges = graph
            .edges
            .iter()
            .map(|e| Edge {
                state: edge_fn(e),
                ..e.clone()
            })
            .collect();
        Self { nodes, edges }
    }
}

/// Common view over both engines' step types.
pub trait StepRecord {
    fn kind(&self) -> StepKind;
    fn description(&self) -> &str;
    fn snapshot(&self) -> &Snapshot;
}

/// Render a distance for human-readable step descriptions: `∞` for
/// unreachable, no trailing `.0` for whole numbers.
pub fn display_distance(d: f64) -> String {
    if d.is_infinite() {
        "∞".to_owned()
    } else if d.fract() == 0.0 && d.abs() < i64::MAX as f64 {
        format!("{}", d as i64)
    } else {
        format!("{d}")
    }
}

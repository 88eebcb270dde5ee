//! Cross-algorithm comparison on a single source/destination pair.
//!
//! Runs both engines to completion on the same graph, timing each, and
//! reduces the two step sequences to summary metrics. The two engines must
//! agree on the shortest distance; a mismatch is surfaced as a warning in
//! the summary (and logged when the `tracing` feature is on), never
//! silently dropped or auto-corrected.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::algorithms::dijkstra::{self, DijkstraStep};
use crate::algorithms::floyd_warshall::{self, FloydWarshallStep};
use crate::graph::{Graph, NodeId};
use crate::step::display_distance;

/// Per-engine summary of one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReport {
    /// Number of steps the engine emitted.
    pub steps: usize,
    /// Wall-clock time for the full materialized run.
    pub duration: Duration,
    /// The engine's reported shortest distance for the pair.
    pub distance: f64,
}

/// Result of running both engines on the same pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub source: NodeId,
    pub dest: NodeId,
    pub dijkstra: EngineReport,
    pub floyd_warshall: EngineReport,
    /// Whether both engines reported the same distance (`∞` counts as
    /// agreement with `∞`).
    pub agreement: bool,
}

impl Comparison {
    /// Correctness warning text when the engines disagree.
    pub fn warning(&self) -> Option<String> {
        if self.agreement {
            return None;
        }
        Some(format!(
            "engines disagree on distance {} → {}: Dijkstra reported {}, Floyd-Warshall reported {}",
            self.source,
            self.dest,
            display_distance(self.dijkstra.distance),
            display_distance(self.floyd_warshall.distance),
        ))
    }
}

/// Run both engines on `(source, dest)` and summarize.
///
/// Both step sequences are fully materialized; neither engine supports
/// mid-run cancellation, so a large graph simply costs latency here.
pub fn compare(graph: &Graph, source: &str, dest: &str) -> Comparison {
    let started = Instant::now();
    let dijkstra_steps = dijkstra::run(graph, source, dest);
    let dijkstra_duration = started.elapsed();

    let started = Instant::now();
    let floyd_steps = floyd_warshall::run(graph, Some((source, dest)));
    let floyd_duration = started.elapsed();

    let dijkstra_distance = match dijkstra_steps.last() {
        Some(DijkstraStep::Final { distance, .. }) => *distance,
        _ => f64::INFINITY,
    };
    let floyd_distance = match floyd_steps.last() {
        Some(FloydWarshallStep::Final { query: Some(q), .. }) => q.distance,
        _ => f64::INFINITY,
    };

    // Exact equality is intended: both engines add the same finite weights,
    // and ∞ == ∞ holds for unreachable pairs.
    let agreement = dijkstra_distance == floyd_distance;

    let comparison = Comparison {
        source: source.to_owned(),
        dest: dest.to_owned(),
        dijkstra: EngineReport {
            steps: dijkstra_steps.len(),
            duration: dijkstra_duration,
            distance: dijkstra_distance,
        },
        floyd_warshall: EngineReport {
            steps: floyd_steps.len(),
            duration: floyd_duration,
            distance: floyd_distance,
        },
        agreement,
    };

    #[cfg(feature = "tracing")]
    if let Some(warning) = comparison.warning() {
        tracing::warn!(source, dest, "{warning}");
    }

    comparison
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
    fn engines_agree_on_the_triangle() {
        let result = compare(&triangle(), "A", "C");
        assert!(result.agreement);
        assert!(result.warning().is_none());
        assert_eq!(result.dijkstra.distance, 7.0);
        assert_eq!(result.floyd_warshall.distance, 7.0);
        assert!(result.dijkstra.steps > 0);
        assert!(result.floyd_warshall.steps > 0);
    }

    #[test]
    fn unreachable_pair_still_agrees() {
        let mut graph = triangle();
        graph.add_node("D", Default::default()).unwrap();
        let result = compare(&graph, "A", "D");
        assert!(result.agreement);
        assert!(result.dijkstra.distance.is_infinite());
        assert!(result.floyd_warshall.distance.is_infinite());
    }

    #[test]
    fn disagreement_produces_a_warning() {
        let result = Comparison {
            source: "A".into(),
            dest: "C".into(),
            dijkstra: EngineReport {
                steps: 8,
                duration: Duration::ZERO,
                distance: 7.0,
            },
            floyd_warshall: EngineReport {
                steps: 5,
                duration: Duration::ZERO,
                distance: 9.0,
            },
            agreement: false,
        };
        let warning = result.warning().unwrap();
        assert!(warning.contains('7'));
        assert!(warning.contains('9'));
    }
}

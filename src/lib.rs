//! Deterministic, replayable step sequences for shortest-path algorithms.
//!
//! This crate is the engine behind a graph-algorithm teaching visualizer:
//! it runs Dijkstra's algorithm and the Floyd-Warshall algorithm over a
//! small weighted undirected graph and produces an ordered sequence of
//! annotated steps. Every step is a complete, self-contained snapshot of
//! the graph, so a caller can scrub forward and backward through a run for
//! animation, render solution tables from the final step, or compare both
//! algorithms on the same pair.
//!
//! ## Core pieces
//! 1. Build a [`Graph`] (by hand, from parts, or randomly).
//! 2. Run an engine from [`algorithms`]; each run materializes its full
//!    step sequence and never mutates the input graph.
//! 3. Feed the steps to a [`StepPlayer`] for interactive playback, or use
//!    [`compare`] to drive both engines and cross-check their answers.
//!
//! ## Quick start
//! ```
//! use pathsteps::algorithms::dijkstra::{self, DijkstraStep};
//! use pathsteps::Graph;
//!
//! let graph = Graph::from_parts(
//!     &["A", "B", "C"],
//!     &[("A", "B", 4.0), ("B", "C", 3.0), ("A", "C", 10.0)],
//! )
//! .unwrap();
//!
//! let steps = dijkstra::run(&graph, "A", "C");
//! let Some(DijkstraStep::Final { path, distance, .. }) = steps.last() else {
//!     unreachable!("a run always ends with a final step");
//! };
//! assert_eq!(path, &["A", "B", "C"]);
//! assert_eq!(*distance, 7.0);
//! ```
//!
//! Scope: this is a teaching tool for graphs of a few dozen nodes. Weights
//! must be positive and finite; negative weights are out of scope.

pub mod algorithms;
pub mod compare;
pub mod error;
pub mod graph;
pub mod heap;
pub mod player;
pub mod step;

pub use crate::compare::{compare, Comparison, EngineReport};
pub use crate::error::GraphError;
pub use crate::graph::{Edge, EdgeState, Graph, Node, NodeState, Position};
pub use crate::player::{PlayerMode, StepPlayer};
pub use crate::step::{Snapshot, StepKind, StepRecord};

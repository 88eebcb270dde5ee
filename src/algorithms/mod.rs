//! Shortest-path step engines.
//!
//! Each engine is a pure function over a [`Graph`](crate::graph::Graph): it
//! never mutates its input and materializes a finite, ordered sequence of
//! annotated steps per run. Runs are not restartable; a new run is a fresh
//! invocation with fresh state.
//!
//! - [`dijkstra`]       : single-pair Dijkstra with early exit at the destination.
//! - [`floyd_warshall`] : all-pairs Floyd-Warshall with full D-matrix history.

pub mod dijkstra;
pub mod floyd_warshall;

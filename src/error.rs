//! Error types for graph construction.
//!
//! The algorithm engines themselves are total functions over a well-formed
//! graph and have no error path; validation lives at the construction seam,
//! where duplicate nodes, dangling endpoints and bad weights are caught
//! before any engine ever sees them.

use thiserror::Error;

/// Rejections raised while building or editing a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A node with this id already exists.
    #[error("node id `{0}` already exists")]
    DuplicateNode(String),

    /// An edge endpoint does not name a known node.
    #[error("edge endpoint `{0}` does not name a node")]
    UnknownEndpoint(String),

    /// An undirected edge between this pair already exists (in either
    /// orientation).
    #[error("an edge between `{0}` and `{1}` already exists")]
    DuplicateEdge(String, String),

    /// Both endpoints are the same node.
    #[error("self-loop on node `{0}` is not allowed")]
    SelfLoop(String),

    /// Edge weights must be positive and finite.
    #[error("edge weight {0} is not a positive finite number")]
    InvalidWeight(f64),

    /// No edge with this id exists.
    #[error("unknown edge id `{0}`")]
    UnknownEdge(String),
}

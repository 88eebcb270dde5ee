//! Weighted undirected graph model shared by every algorithm.
//!
//! A [`Graph`] is built once (by hand, from parts, or randomly) and then
//! handed to an engine, which never mutates it: each emitted step carries its
//! own annotated copy of the nodes and edges. The `distance` and `state`
//! fields on [`Node`]/[`Edge`] are those per-step annotations; `id`,
//! `position` and `weight` are stable for the life of the graph.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Unique node identifier. Opaque to the engines beyond equality.
pub type NodeId = String;

/// Unique edge identifier, derived from the endpoints as `e<source>-<target>`.
pub type EdgeId = String;

/// Canvas coordinates. Carried through snapshots untouched; the engines never
/// look at it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Per-step node annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Unvisited,
    Visiting,
    Visited,
    Path,
    Processing,
}

/// Per-step edge annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeState {
    Default,
    Relaxing,
    Visited,
    Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    pub label: String,
    /// Best known distance from the source; `f64::INFINITY` until annotated.
    /// Serialized as `null` when infinite, since JSON has no infinity.
    #[serde(with = "serde_distance")]
    pub distance: f64,
    pub state: NodeState,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, position: Position) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            position,
            distance: f64::INFINITY,
            state: NodeState::Unvisited,
        }
    }
}

/// Undirected weighted edge. Contributes adjacency in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
    pub state: EdgeState,
}

/// One adjacency entry: the neighbor reached, the weight paid, and the edge
/// travelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub node: NodeId,
    pub weight: f64,
    pub edge: EdgeId,
}

/// The graph handed to an engine run.
///
/// Mutation goes through the validated `add_*`/`remove_*` methods, which
/// enforce what the engines assume: unique node ids, unique undirected edges,
/// positive finite weights, no self-loops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Add a node with `label == id` at the given position.
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        position: Position,
    ) -> Result<(), GraphError> {
        let id = id.into();
        if self.node(&id).is_some() {
            return Err(GraphError::DuplicateNode(id));
        }
        self.nodes.push(Node::new(id, position));
        Ok(())
    }

    /// Add an undirected edge between two existing nodes.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        weight: f64,
    ) -> Result<EdgeId, GraphError> {
        if source == target {
            return Err(GraphError::SelfLoop(source.to_owned()));
        }
        if self.node(source).is_none() {
            return Err(GraphError::UnknownEndpoint(source.to_owned()));
        }
        if self.node(target).is_none() {
            return Err(GraphError::UnknownEndpoint(target.to_owned()));
        }
        if !(weight.is_finite() && weight > 0.0) {
            return Err(GraphError::InvalidWeight(weight));
        }
        if self.edge_between(source, target).is_some() {
            return Err(GraphError::DuplicateEdge(
                source.to_owned(),
                target.to_owned(),
            ));
        }
        let id = edge_id(source, target);
        self.edges.push(Edge {
            id: id.clone(),
            source: source.to_owned(),
            target: target.to_owned(),
            weight,
            state: EdgeState::Default,
        });
        Ok(id)
    }

    /// Remove a node and every edge incident to it. Unknown ids are a no-op.
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| e.source != id && e.target != id);
    }

    /// Remove an edge by id. Unknown ids are a no-op.
    pub fn remove_edge(&mut self, id: &str) {
        self.edges.retain(|e| e.id != id);
    }

    pub fn set_edge_weight(&mut self, id: &str, weight: f64) -> Result<(), GraphError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(GraphError::InvalidWeight(weight));
        }
        match self.edges.iter_mut().find(|e| e.id == id) {
            Some(edge) => {
                edge.weight = weight;
                Ok(())
            }
            None => Err(GraphError::UnknownEdge(id.to_owned())),
        }
    }

    /// The edge joining a pair, in either orientation.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
    }

    /// Adjacency map: each undirected edge contributes an entry in both
    /// directions. Neighbor lists follow edge insertion order, so traversal
    /// order is deterministic for a given graph.
    pub fn adjacency(&self) -> BTreeMap<NodeId, Vec<Neighbor>> {
        let mut adjacency: BTreeMap<NodeId, Vec<Neighbor>> = BTreeMap::new();
        for node in &self.nodes {
            adjacency.entry(node.id.clone()).or_default();
        }
        for edge in &self.edges {
            adjacency
                .entry(edge.source.clone())
                .or_default()
                .push(Neighbor {
                    node: edge.target.clone(),
                    weight: edge.weight,
                    edge: edge.id.clone(),
                });
            adjacency
                .entry(edge.target.clone())
                .or_default()
                .push(Neighbor {
                    node: edge.source.clone(),
                    weight: edge.weight,
                    edge: edge.id.clone(),
                });
        }
        adjacency
    }

    /// Restore every node to `distance = ∞, state = Unvisited` and every edge
    /// to `Default`, regardless of which algorithm annotated them.
    pub fn reset_annotations(&mut self) {
        for node in &mut self.nodes {
            node.distance = f64::INFINITY;
            node.state = NodeState::Unvisited;
        }
        for edge in &mut self.edges {
            edge.state = EdgeState::Default;
        }
    }

    /// Build a random graph: `node_count` nodes named `1..=node_count` laid
    /// out on a circle, with `⌊1.5·n⌋` attempted random edges of integer
    /// weight 1..=10 (self-loops and duplicates skipped, so the final edge
    /// count may be lower).
    pub fn random<R: Rng>(rng: &mut R, node_count: usize) -> Self {
        let mut graph = Graph::new();
        for i in 0..node_count {
            let id = (i + 1).to_string();
            // Validated above by construction: ids are unique.
            let _ = graph.add_node(id, circular_position(i, node_count));
        }
        // Fewer than two nodes cannot host an edge; resampling a distinct
        // target below would never terminate.
        if node_count < 2 {
            return graph;
        }
        let attempts = node_count * 3 / 2;
        for _ in 0..attempts {
            let source = rng.gen_range(0..node_count) + 1;
            let mut target = rng.gen_range(0..node_count) + 1;
            while target == source {
                target = rng.gen_range(0..node_count) + 1;
            }
            let weight = rng.gen_range(1..=10) as f64;
            // Duplicates between the same pair are simply skipped.
            let _ = graph.add_edge(&source.to_string(), &target.to_string(), weight);
        }
        graph
    }

    /// Build a graph from explicit node names and a weighted edge list,
    /// with nodes laid out on a circle in the given order.
    pub fn from_parts(
        names: &[&str],
        edges: &[(&str, &str, f64)],
    ) -> Result<Self, GraphError> {
        let mut graph = Graph::new();
        for (i, name) in names.iter().enumerate() {
            graph.add_node(*name, circular_position(i, names.len()))?;
        }
        for (source, target, weight) in edges {
            graph.add_edge(source, target, *weight)?;
        }
        Ok(graph)
    }
}

mod serde_distance {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &f64, s: S) -> Result<S::Ok, S::Error> {
        if d.is_finite() {
            s.serialize_some(d)
        } else {
            s.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::INFINITY))
    }
}

/// Derive the canonical edge id for a source/target pair.
pub fn edge_id(source: &str, target: &str) -> EdgeId {
    format!("e{source}-{target}")
}

fn circular_position(index: usize, count: usize) -> Position {
    const RADIUS: f64 = 200.0;
    const CENTER_X: f64 = 400.0;
    const CENTER_Y: f64 = 300.0;
    let angle = index as f64 / count.max(1) as f64 * std::f64::consts::TAU;
    Position {
        x: CENTER_X + RADIUS * angle.cos(),
        y: CENTER_Y + RADIUS * angle.sin(),
    }
}

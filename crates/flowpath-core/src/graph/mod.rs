//! Directed graph of flow nodes and sequence flows
//!
//! A diagram is reduced to a plain adjacency structure: node ids mapped to
//! their outgoing edges. The rich BPMN element taxonomy (tasks, gateways,
//! events) carries no behavior the search needs and is not modeled here.

pub mod bfs;

pub use bfs::{find_path, PathResult};

use std::collections::HashMap;

use crate::bpmn::Diagram;
use crate::error::{FlowpathError, Result};

/// A directed sequence-flow edge between two flow nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// A flow node and its outgoing edges, in the order they were added
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    outgoing: Vec<Edge>,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn outgoing(&self) -> &[Edge] {
        &self.outgoing
    }
}

/// Directed graph keyed by flow-node id. Owns all nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<String, Node>,
}

impl Graph {
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Outgoing edges of `id`, in insertion order. Empty for unknown ids.
    pub fn outgoing(&self, id: &str) -> &[Edge] {
        self.nodes.get(id).map(|n| n.outgoing()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.outgoing.len()).sum()
    }

    /// All node ids, sorted for deterministic output
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Build a graph from a parsed diagram's flat node and flow lists.
    ///
    /// Sequence flows are added in document order, which fixes the
    /// edge-iteration order the path search later relies on.
    pub fn from_diagram(diagram: &Diagram) -> Result<Graph> {
        let mut builder = GraphBuilder::new();
        for id in &diagram.nodes {
            builder.add_node(id)?;
        }
        for flow in &diagram.flows {
            builder.add_edge(&flow.source, &flow.target)?;
        }
        Ok(builder.build())
    }
}

/// Incremental graph construction with endpoint validation
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: HashMap<String, Node>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a flow node. Re-declaring an id is a no-op, not an error:
    /// the same node may be encountered more than once while scanning a
    /// document.
    pub fn add_node(&mut self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(FlowpathError::InvalidNodeId {
                reason: "empty node id".to_string(),
            });
        }
        self.nodes.entry(id.to_string()).or_insert_with(|| Node {
            id: id.to_string(),
            outgoing: Vec::new(),
        });
        Ok(())
    }

    /// Add a directed edge. Both endpoints must already be declared;
    /// a dangling reference is a malformed diagram, not a new node.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<()> {
        let unknown = if !self.nodes.contains_key(source) {
            Some(source)
        } else if !self.nodes.contains_key(target) {
            Some(target)
        } else {
            None
        };
        if let Some(unknown) = unknown {
            return Err(FlowpathError::MalformedGraph {
                source_id: source.to_string(),
                target: target.to_string(),
                unknown: unknown.to_string(),
            });
        }

        if let Some(node) = self.nodes.get_mut(source) {
            node.outgoing.push(Edge {
                source: source.to_string(),
                target: target.to_string(),
            });
        }
        Ok(())
    }

    pub fn build(self) -> Graph {
        Graph { nodes: self.nodes }
    }
}

//! Breadth-first path search between two flow nodes

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::error::{FlowpathError, Result};
use crate::graph::Graph;

/// Result of a path search. `found: false` means the search completed
/// without reaching the target, which is a valid outcome (the target is
/// unreachable), distinct from the error cases.
#[derive(Debug, Clone, Serialize)]
pub struct PathResult {
    pub from: String,
    pub to: String,
    pub found: bool,
    /// Node ids from `from` to `to` inclusive; empty when not found
    pub nodes: Vec<String>,
    /// Number of edges along the path
    pub path_length: usize,
}

/// Find one path from `from` to `to` using unweighted BFS.
///
/// The first path discovered is returned, which is shortest by hop count.
/// When several shortest paths exist, the one chosen is determined by the
/// order edges were added to the graph (document order for a parsed
/// diagram), so results are reproducible for a given input.
///
/// Both endpoints must exist in the graph; a missing id is a
/// `NodeNotFound` error rather than an empty result.
#[tracing::instrument(skip(graph), fields(from = %from, to = %to, nodes = graph.node_count()))]
pub fn find_path(graph: &Graph, from: &str, to: &str) -> Result<PathResult> {
    if !graph.contains(from) {
        return Err(FlowpathError::NodeNotFound {
            id: from.to_string(),
        });
    }
    if !graph.contains(to) {
        return Err(FlowpathError::NodeNotFound { id: to.to_string() });
    }

    let (found, predecessors) = bfs_search(graph, from, to);

    let nodes = if found {
        reconstruct_path(from, to, &predecessors)
    } else {
        Vec::new()
    };

    Ok(PathResult {
        from: from.to_string(),
        to: to.to_string(),
        found,
        path_length: nodes.len().saturating_sub(1),
        nodes,
    })
}

/// BFS over outgoing edges, recording each node's predecessor on first
/// discovery. Nodes are marked visited at enqueue time, so no node is
/// queued twice and the queue is bounded by the node count. The frontier
/// holds bare node ids; the path itself is reconstructed from the
/// predecessor map once the target is reached.
fn bfs_search(graph: &Graph, from: &str, to: &str) -> (bool, HashMap<String, String>) {
    let mut visited: HashSet<String> = HashSet::new();
    let mut predecessors: HashMap<String, String> = HashMap::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    queue.push_back(from.to_string());
    visited.insert(from.to_string());

    while let Some(current_id) = queue.pop_front() {
        if current_id == to {
            return (true, predecessors);
        }

        for edge in graph.outgoing(&current_id) {
            if visited.contains(&edge.target) {
                continue;
            }
            visited.insert(edge.target.clone());
            predecessors.insert(edge.target.clone(), current_id.clone());
            queue.push_back(edge.target.clone());
        }
    }

    (false, predecessors)
}

fn reconstruct_path(from: &str, to: &str, predecessors: &HashMap<String, String>) -> Vec<String> {
    let mut nodes: Vec<String> = Vec::new();

    let mut current = to.to_string();
    nodes.push(current.clone());

    while current != from {
        if let Some(pred) = predecessors.get(&current) {
            current = pred.clone();
            nodes.push(current.clone());
        } else {
            break;
        }
    }

    nodes.reverse();
    nodes
}

//! LayoutGraph — the node/edge input as a petgraph DiGraph.
//!
//! Building the graph is where the input is checked: duplicate node ids,
//! unusable node sizes and edges to unknown nodes are rejected before any
//! layout work.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{LayoutEdge, LayoutNode};
use crate::error::{LayoutError, LayoutResult};

/// Directed graph of layout nodes. Node indices follow input order.
pub struct LayoutGraph {
    pub digraph: DiGraph<LayoutNode, ()>,
    /// Maps node id → petgraph NodeIndex.
    pub node_index: HashMap<String, NodeIndex>,
}

impl LayoutGraph {
    /// Build the graph, failing on duplicate ids, invalid sizes or dangling
    /// edges.
    ///
    /// Parallel duplicate edges collapse into one. Self-loops are checked
    /// but not stored; they carry no ranking information.
    pub fn build(nodes: &[LayoutNode], edges: &[LayoutEdge]) -> LayoutResult<Self> {
        let mut digraph: DiGraph<LayoutNode, ()> = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_index: HashMap<String, NodeIndex> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            if node_index.contains_key(&node.id) {
                return Err(LayoutError::duplicate_node(&node.id));
            }
            check_size(node)?;
            let idx = digraph.add_node(node.clone());
            node_index.insert(node.id.clone(), idx);
        }

        for edge in edges {
            let src = lookup(&node_index, edge, &edge.source)?;
            let tgt = lookup(&node_index, edge, &edge.target)?;
            if !edge.is_self_loop() {
                digraph.update_edge(src, tgt, ());
            }
        }

        Ok(Self {
            digraph,
            node_index,
        })
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    /// Returns true if the graph has no cycles.
    pub fn is_dag(&self) -> bool {
        toposort(&self.digraph, None).is_ok()
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = &LayoutNode> {
        self.digraph.node_indices().map(|idx| &self.digraph[idx])
    }

    /// Deduplicated edges as (source index, target index) in insertion order.
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.digraph
            .edge_indices()
            .filter_map(|e| self.digraph.edge_endpoints(e))
            .map(|(s, t)| (s.index(), t.index()))
            .collect()
    }
}

fn lookup(
    node_index: &HashMap<String, NodeIndex>,
    edge: &LayoutEdge,
    id: &str,
) -> LayoutResult<NodeIndex> {
    node_index
        .get(id)
        .copied()
        .ok_or_else(|| LayoutError::dangling_edge(&edge.source, &edge.target, id))
}

/// Widths and heights must be finite and non-negative.
fn check_size(node: &LayoutNode) -> LayoutResult<()> {
    for (name, value) in [("width", node.width), ("height", node.height)] {
        if !value.is_finite() {
            return Err(LayoutError::invalid_node(
                &node.id,
                format!("{name} must be finite, got {value}"),
            ));
        }
        if value < 0.0 {
            return Err(LayoutError::invalid_node(
                &node.id,
                format!("{name} must not be negative, got {value}"),
            ));
        }
    }
    Ok(())
}

/// Check the input without building a graph.
pub fn validate(nodes: &[LayoutNode], edges: &[LayoutEdge]) -> LayoutResult<()> {
    let mut ids: HashSet<&str> = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(LayoutError::duplicate_node(&node.id));
        }
        check_size(node)?;
    }
    for edge in edges {
        for end in [&edge.source, &edge.target] {
            if !ids.contains(end.as_str()) {
                return Err(LayoutError::dangling_edge(&edge.source, &edge.target, end));
            }
        }
    }
    Ok(())
}

/// Ids that appear as an endpoint of at least one edge.
pub fn connected_ids(edges: &[LayoutEdge]) -> HashSet<&str> {
    edges
        .iter()
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .collect()
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_graph.rs"]
mod tests;

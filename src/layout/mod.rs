//! Layout engine: connected-graph layering plus grid packing for the rest.

pub mod graph;
pub mod grid;
pub mod sugiyama;
pub mod types;

pub use graph::LayoutGraph;
pub use grid::{bounds, pack_grid};
pub use types::{Bounds, Direction, Layout, LayoutEdge, LayoutNode, PositionedNode, Side};

use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::LayoutResult;

/// Lay out `nodes` as a layered graph.
///
/// Returns the nodes in input order with top-left positions. Nodes that
/// touch no edge share the first rank.
#[tracing::instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len(), %direction))]
pub fn layout_connected(
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
    direction: Direction,
    config: &LayoutConfig,
) -> LayoutResult<Vec<PositionedNode>> {
    config.validate()?;
    let graph = LayoutGraph::build(nodes, edges)?;
    Ok(sugiyama::layout(&graph, direction, config))
}

/// Lay out connected nodes as a layered graph and pack every node with no
/// edge into a grid beneath it.
///
/// Returns connected nodes first (input order), then grid nodes (input
/// order), with the edge list passed through.
#[tracing::instrument(skip_all, fields(nodes = nodes.len(), edges = edges.len(), %direction))]
pub fn layout_full(
    nodes: &[LayoutNode],
    edges: &[LayoutEdge],
    direction: Direction,
    config: &LayoutConfig,
) -> LayoutResult<Layout> {
    config.validate()?;
    graph::validate(nodes, edges)?;

    let endpoints = graph::connected_ids(edges);
    let (connected, disconnected): (Vec<&LayoutNode>, Vec<&LayoutNode>) = nodes
        .iter()
        .partition(|n| endpoints.contains(n.id.as_str()));

    let mut positioned = if connected.is_empty() || edges.is_empty() {
        Vec::new()
    } else {
        let connected: Vec<LayoutNode> = connected.into_iter().cloned().collect();
        layout_connected(&connected, edges, direction, config)?
    };

    let origin = grid::grid_origin(bounds(&positioned), config);
    debug!(
        connected = positioned.len(),
        disconnected = disconnected.len(),
        origin_x = origin.0,
        origin_y = origin.1,
        "packing disconnected nodes"
    );
    positioned.extend(pack_grid(disconnected, origin, direction, config));

    Ok(Layout {
        nodes: positioned,
        edges: edges.to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout.rs"]
mod tests;

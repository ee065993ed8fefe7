//! Grid packing for nodes that take part in no edge.

use super::types::{Bounds, Direction, LayoutNode, PositionedNode};
use crate::config::LayoutConfig;

/// Extent of a laid-out node set: leftmost `x` and lowest bottom edge.
/// Empty input yields the origin.
pub fn bounds(nodes: &[PositionedNode]) -> Bounds {
    nodes
        .iter()
        .fold(None, |acc: Option<Bounds>, n| {
            Some(match acc {
                None => Bounds {
                    min_x: n.x,
                    max_y: n.bottom(),
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(n.x),
                    max_y: b.max_y.max(n.bottom()),
                },
            })
        })
        .unwrap_or_default()
}

/// Top-left corner of the first grid cell below a connected layout.
pub fn grid_origin(bounds: Bounds, config: &LayoutConfig) -> (f64, f64) {
    (bounds.min_x, bounds.max_y + config.disconnected_y_offset)
}

/// Lay nodes out row by row, `grid_cols` per row, in input order.
///
/// `config` must have passed [`LayoutConfig::validate`]; zero columns panics.
pub fn pack_grid<'a>(
    nodes: impl IntoIterator<Item = &'a LayoutNode>,
    origin: (f64, f64),
    direction: Direction,
    config: &LayoutConfig,
) -> Vec<PositionedNode> {
    let cols = config.grid_cols;
    let (start_x, start_y) = origin;
    nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            let col = (i % cols) as f64;
            let row = (i / cols) as f64;
            PositionedNode::new(
                node.clone(),
                start_x + col * config.grid_gap_x,
                start_y + row * config.grid_gap_y,
                direction,
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_grid.rs"]
mod tests;

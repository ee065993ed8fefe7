//! Layout configuration.
//!
//! Every field has a default matching the Mindverse canvas, so a config
//! file only needs to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

// ─── Defaults ────────────────────────────────────────────────────────────────

/// Width of a thought card on the canvas.
pub const DEFAULT_NODE_WIDTH: f64 = 260.0;
/// Height of a thought card on the canvas.
pub const DEFAULT_NODE_HEIGHT: f64 = 220.0;
pub const DEFAULT_NODE_SEP: f64 = 60.0;
pub const DEFAULT_EDGE_SEP: f64 = 20.0;
pub const DEFAULT_RANK_SEP: f64 = 120.0;
pub const DEFAULT_MARGIN: f64 = 60.0;
pub const DEFAULT_GRID_COLS: usize = 4;
pub const DEFAULT_GRID_GAP_X: f64 = 300.0;
pub const DEFAULT_GRID_GAP_Y: f64 = 260.0;
pub const DEFAULT_DISCONNECTED_Y_OFFSET: f64 = 100.0;

// ─── LayoutConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutConfig {
    /// Card width used for document nodes that omit `width`.
    pub node_width: f64,
    /// Card height used for document nodes that omit `height`.
    pub node_height: f64,
    /// Gap between neighbouring nodes on the same rank.
    pub node_sep: f64,
    /// Gap contributed by an edge bend point (dummy node) on a rank.
    pub edge_sep: f64,
    /// Gap between consecutive ranks.
    pub rank_sep: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Columns in the grid that holds nodes with no edges.
    pub grid_cols: usize,
    pub grid_gap_x: f64,
    pub grid_gap_y: f64,
    /// Distance from the bottom of the connected layout to the first grid row.
    pub disconnected_y_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            node_sep: DEFAULT_NODE_SEP,
            edge_sep: DEFAULT_EDGE_SEP,
            rank_sep: DEFAULT_RANK_SEP,
            margin_x: DEFAULT_MARGIN,
            margin_y: DEFAULT_MARGIN,
            grid_cols: DEFAULT_GRID_COLS,
            grid_gap_x: DEFAULT_GRID_GAP_X,
            grid_gap_y: DEFAULT_GRID_GAP_Y,
            disconnected_y_offset: DEFAULT_DISCONNECTED_Y_OFFSET,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config and validate it.
    pub fn from_json(src: &str) -> LayoutResult<Self> {
        let config: Self = serde_json::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce overlapping or non-finite layouts.
    pub fn validate(&self) -> LayoutResult<()> {
        positive("nodeWidth", self.node_width)?;
        positive("nodeHeight", self.node_height)?;
        for (name, value) in [
            ("nodeSep", self.node_sep),
            ("edgeSep", self.edge_sep),
            ("rankSep", self.rank_sep),
            ("marginX", self.margin_x),
            ("marginY", self.margin_y),
            ("gridGapX", self.grid_gap_x),
            ("gridGapY", self.grid_gap_y),
            ("disconnectedYOffset", self.disconnected_y_offset),
        ] {
            non_negative(name, value)?;
        }
        if self.grid_cols == 0 {
            return Err(LayoutError::invalid_config("gridCols must be at least 1"));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> LayoutResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid_config(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f64) -> LayoutResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid_config(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;

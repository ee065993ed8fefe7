//! mindverse-layout — hierarchical auto-layout for the Mindverse canvas.
//!
//! Public API: `layout_full()`, `layout_connected()`, `layout_json()`.
//!
//! Modules:
//!   config     // LayoutConfig and its defaults
//!   error      // LayoutError, LayoutResult
//!   layout     // Direction, nodes/edges, Sugiyama phases, grid packing
//!   document   // JSON graph document

pub mod config;
pub mod document;
pub mod error;
pub mod layout;

#[cfg(feature = "wasm")]
mod wasm;

pub use crate::config::LayoutConfig;
pub use crate::document::{GraphDocument, LayoutMode};
pub use crate::error::{LayoutError, LayoutResult};
pub use crate::layout::{
    Direction, Layout, LayoutEdge, LayoutNode, PositionedNode, Side, layout_connected, layout_full,
};

/// Lay out a JSON graph document with the default config and return the
/// layout as JSON.
///
/// `direction` overrides the document's own direction.
pub fn layout_json(src: &str, direction: Option<&str>) -> LayoutResult<String> {
    layout_json_with_config(src, direction, &LayoutConfig::default())
}

/// Lay out a JSON graph document with a custom config.
pub fn layout_json_with_config(
    src: &str,
    direction: Option<&str>,
    config: &LayoutConfig,
) -> LayoutResult<String> {
    let direction = direction.map(str::parse::<Direction>).transpose()?;
    let doc = GraphDocument::from_json(src)?;
    let layout = doc.layout(direction, config, LayoutMode::Full)?;
    Ok(serde_json::to_string(&layout)?)
}

//! JSON graph document exchanged with the canvas, the CLI and wasm callers.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::LayoutResult;
use crate::layout::{Direction, Layout, LayoutEdge, LayoutNode, layout_connected, layout_full};

/// A node as sent by the canvas. Missing dimensions fall back to the
/// configured card size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl DocumentNode {
    pub fn resolve(&self, config: &LayoutConfig) -> LayoutNode {
        LayoutNode::new(
            self.id.clone(),
            self.width.unwrap_or(config.node_width),
            self.height.unwrap_or(config.node_height),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub nodes: Vec<DocumentNode>,
    #[serde(default)]
    pub edges: Vec<LayoutEdge>,
}

/// Which phases of the engine a document runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Layered layout plus grid packing.
    #[default]
    Full,
    /// Layered layout of every node, no grid.
    ConnectedOnly,
}

impl GraphDocument {
    pub fn from_json(src: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn nodes(&self, config: &LayoutConfig) -> Vec<LayoutNode> {
        self.nodes.iter().map(|n| n.resolve(config)).collect()
    }

    /// Lay out the document. `direction` overrides the document's own.
    pub fn layout(
        &self,
        direction: Option<Direction>,
        config: &LayoutConfig,
        mode: LayoutMode,
    ) -> LayoutResult<Layout> {
        let direction = direction.or(self.direction).unwrap_or_default();
        let nodes = self.nodes(config);
        match mode {
            LayoutMode::Full => layout_full(&nodes, &self.edges, direction, config),
            LayoutMode::ConnectedOnly => Ok(Layout {
                nodes: layout_connected(&nodes, &self.edges, direction, config)?,
                edges: self.edges.clone(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_document.rs"]
mod tests;

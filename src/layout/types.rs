//! Layout types: Direction, Side, LayoutNode, LayoutEdge, PositionedNode, Layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH};
use crate::error::LayoutError;

// ─── Direction ───────────────────────────────────────────────────────────────

/// Flow direction of the layered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Direction {
    /// Top to bottom.
    #[default]
    TB,
    /// Bottom to top.
    BT,
    /// Left to right.
    LR,
    /// Right to left.
    RL,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::TB, Direction::BT, Direction::LR, Direction::RL];

    /// Ranks advance along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LR | Direction::RL)
    }

    /// Ranks advance towards negative canvas coordinates.
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::BT | Direction::RL)
    }

    /// `(target_side, source_side)`: where incoming connectors enter and
    /// outgoing connectors leave a node.
    pub fn sides(self) -> (Side, Side) {
        if self.is_horizontal() {
            (Side::Left, Side::Right)
        } else {
            (Side::Top, Side::Bottom)
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::TB => "TB",
            Direction::BT => "BT",
            Direction::LR => "LR",
            Direction::RL => "RL",
        }
    }
}

impl FromStr for Direction {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TB" | "TD" => Ok(Direction::TB),
            "BT" => Ok(Direction::BT),
            "LR" => Ok(Direction::LR),
            "RL" => Ok(Direction::RL),
            _ => Err(LayoutError::invalid_direction(s)),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Side ────────────────────────────────────────────────────────────────────

/// Edge of a node's bounding box that a connector attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

// ─── LayoutNode / LayoutEdge ─────────────────────────────────────────────────

/// A node to be positioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

impl LayoutNode {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    /// A node with the standard thought-card dimensions.
    pub fn card(id: impl Into<String>) -> Self {
        Self::new(id, DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT)
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
}

impl LayoutEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

// ─── PositionedNode ──────────────────────────────────────────────────────────

/// A node with its computed top-left corner and connector sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: LayoutNode,
    pub x: f64,
    pub y: f64,
    pub target_side: Side,
    pub source_side: Side,
}

impl PositionedNode {
    pub fn new(node: LayoutNode, x: f64, y: f64, direction: Direction) -> Self {
        let (target_side, source_side) = direction.sides();
        Self {
            node,
            x,
            y,
            target_side,
            source_side,
        }
    }

    pub fn id(&self) -> &str {
        &self.node.id
    }

    pub fn right(&self) -> f64 {
        self.x + self.node.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.node.height
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x + self.node.width / 2.0,
            self.y + self.node.height / 2.0,
        )
    }
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Output of a full layout: connected nodes first, then grid-packed ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: Vec<PositionedNode>,
    /// The input edges, unchanged.
    pub edges: Vec<LayoutEdge>,
}

impl Layout {
    pub fn get(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.node.id == id)
    }
}

/// Extent of the connected layout used to anchor the disconnected grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_x: f64,
    pub max_y: f64,
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;

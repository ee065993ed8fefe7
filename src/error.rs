//! Error taxonomy for the layout engine.

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("invalid direction '{0}'; use TB, BT, LR, or RL")]
    InvalidDirection(String),

    /// An edge endpoint is not in the node set. `missing` is the unknown id.
    #[error("edge '{from}' -> '{to}' references unknown node '{missing}'")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    #[error("node '{id}' has invalid size: {reason}")]
    InvalidNode { id: String, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    pub fn invalid_direction(value: impl Into<String>) -> Self {
        Self::InvalidDirection(value.into())
    }

    pub fn dangling_edge(
        from: impl Into<String>,
        to: impl Into<String>,
        missing: impl Into<String>,
    ) -> Self {
        Self::DanglingEdge {
            from: from.into(),
            to: to.into(),
            missing: missing.into(),
        }
    }

    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode(id.into())
    }

    pub fn invalid_node(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNode {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_error.rs"]
mod tests;

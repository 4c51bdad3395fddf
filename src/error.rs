//! Error types for the B-tree map.

use thiserror::Error;

/// Result type alias for tree operations
pub type Result<T> = std::result::Result<T, BTreeError>;

/// Errors that can occur when building, encoding or inspecting a tree
#[derive(Error, Debug)]
pub enum BTreeError {
    /// Order is too small to form a valid B-tree
    #[error("Invalid order {order}: must be at least {min}")]
    InvalidOrder { order: usize, min: usize },

    /// Tree contents could not be rendered as JSON
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Input was not a valid encoded tree; the target was left unmodified
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// A structural invariant does not hold
    #[error("Corruption detected: {0}")]
    Corruption(String),
}

impl BTreeError {
    /// Create a corruption error with a message
    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }
}

//! Store Error Types
//!
//! Errors raised by `NodeStore` implementations. The trait itself returns
//! `anyhow::Result`, so hosts may surface their own error types; these cover
//! the cases the bundled in-memory store can hit.

use thiserror::Error;

/// Node store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Node not found by ID
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// Parent reference does not point at an existing node
    #[error("Invalid parent node: {parent_id}")]
    InvalidParent { parent_id: String },

    /// Store refused the write
    #[error("Store rejected operation: {0}")]
    Rejected(String),

    /// Snapshot could not be read or written
    #[error("Snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create an invalid parent error
    pub fn invalid_parent(parent_id: impl Into<String>) -> Self {
        Self::InvalidParent {
            parent_id: parent_id.into(),
        }
    }

    /// Create a rejected operation error
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }
}

//! Service Layer Error Types
//!
//! Error types for tree duplication. In lenient mode only a failure on the
//! root reaches the caller; everything below the root is recorded in the
//! `DuplicationReport` instead.

use thiserror::Error;

/// Tree duplication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DuplicationError {
    /// Source node not found by ID
    #[error("Node not found: {id}")]
    NotFound { id: String },

    /// Store refused to create the copy
    #[error("Failed to create copy of node {source_id}: {reason}")]
    CreationFailed { source_id: String, reason: String },

    /// Strict mode stopped at the first failure below the root
    #[error("Duplication aborted at node {source_id} after {} copies: {reason}", created.len())]
    Aborted {
        source_id: String,
        reason: String,
        /// Copies created before the abort (left in place)
        created: Vec<String>,
        /// Metadata reads or writes that failed on those copies
        metadata_failures: usize,
    },

    /// Duplicator configuration is invalid
    #[error("Invalid duplicator configuration: {0}")]
    InvalidConfig(String),
}

impl DuplicationError {
    /// Create a node not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a creation failed error
    pub fn creation_failed(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CreationFailed {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }

    /// Create an aborted error
    pub fn aborted(
        source_id: impl Into<String>,
        reason: impl Into<String>,
        created: Vec<String>,
        metadata_failures: usize,
    ) -> Self {
        Self::Aborted {
            source_id: source_id.into(),
            reason: reason.into(),
            created,
            metadata_failures,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

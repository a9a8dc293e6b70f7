//! NodeStore Trait - Host Storage Boundary
//!
//! This module defines the `NodeStore` trait: the only calls the duplicator
//! makes into the host content store. Hosts implement it over their own
//! storage engine; [`super::MemoryStore`] implements it in memory.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: All methods are async so network-backed hosts fit
//!    without blocking
//! 2. **Ownership Semantics**: `create_node` takes its fields by value
//! 3. **Error Handling**: Uses `anyhow::Result` so hosts can surface their
//!    own error types
//!
//! # Examples
//!
//! ```rust
//! use pagetree_core::db::{MemoryStore, NodeStore};
//! use pagetree_core::models::NewNode;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let store = MemoryStore::new();
//! let id = store
//!     .create_node(NewNode::page("Home", "", None, "admin"))
//!     .await?;
//! store.add_metadata(&id, "template", json!("full-width")).await?;
//!
//! let metadata = store.get_metadata(&id).await?;
//! assert_eq!(metadata["template"], vec![json!("full-width")]);
//! # Ok(())
//! # }
//! ```

use crate::models::{Metadata, NewNode, Node};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Abstraction over the host's node persistence.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a store can be shared behind an
/// `Arc` across async tasks.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Get node by ID
    ///
    /// - `Ok(Some(node))` if node exists
    /// - `Ok(None)` if node doesn't exist (not an error)
    /// - `Err(_)` if the store failed
    async fn get_node(&self, id: &str) -> Result<Option<Node>>;

    /// Create and persist a new node, returning its store-assigned ID
    ///
    /// # Errors
    ///
    /// Returns error if the store rejects the record, e.g. when `parent_id`
    /// does not reference an existing node.
    async fn create_node(&self, fields: NewNode) -> Result<String>;

    /// Get all metadata for a node (empty map if it has none)
    async fn get_metadata(&self, id: &str) -> Result<Metadata>;

    /// Attach one value under `key`
    ///
    /// Appends rather than replaces: calling this repeatedly with the same
    /// key builds a multi-valued entry.
    async fn add_metadata(&self, id: &str, key: &str, value: Value) -> Result<()>;

    /// Get the direct children of a node, in the store's default order
    async fn get_children(&self, parent_id: &str) -> Result<Vec<Node>>;
}

//! PageTree Core
//!
//! This crate duplicates a page and all of its descendant pages inside a host
//! content store, preserving hierarchy and key/value metadata.
//!
//! # Architecture
//!
//! - **Store boundary**: the host is reached only through the [`db::NodeStore`] trait
//! - **Depth-first copy**: each node is copied, then its children are copied
//!   under the new node
//! - **Configurable failure policy**: lenient (skip failed subtrees) or strict
//!   (abort and report)
//!
//! # Modules
//!
//! - [`models`] - Data structures (Node, Metadata, DuplicationReport)
//! - [`db`] - Store trait and the in-memory store
//! - [`services`] - The tree duplicator
//! - [`config`] - Duplicator configuration

pub mod config;
pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::{DuplicationMode, DuplicatorConfig};
pub use db::{MemoryStore, NodeStore, StoreError, StoreSnapshot};
pub use models::*;
pub use services::*;

//! Database Layer
//!
//! This module holds the boundary to the host content store:
//!
//! - `NodeStore` - the trait every host store implements
//! - `MemoryStore` - an in-memory store with JSON snapshot import/export
//! - `StoreError` - errors raised by the bundled store

mod error;
mod memory_store;
mod node_store;

pub use error::StoreError;
pub use memory_store::{MemoryStore, StoreSnapshot};
pub use node_store::NodeStore;

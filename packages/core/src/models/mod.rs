//! Data Models
//!
//! This module contains the data structures used throughout PageTree:
//!
//! - `Node` / `NewNode` - Page records and the fields used to create them
//! - `Metadata` - Multi-valued key/value data attached to a node
//! - `DuplicationReport` - What a tree duplication created and skipped

mod metadata;
mod node;
mod report;

pub use metadata::{maybe_unserialize, metadata_value_count, Metadata};
pub use node::{ActingUser, NewNode, Node, NodeStatus, PAGE_NODE_TYPE};
pub use report::{CopiedNode, DuplicationReport, SkippedNode};

//! Node Data Structures
//!
//! This module defines the `Node` struct for page records held by the host
//! content store, plus the `NewNode` field set used to create them.
//!
//! # Architecture
//!
//! - **Host-assigned identity**: `id` and `created_at` are filled in by the
//!   store on creation, never by callers
//! - **Parent reference hierarchy**: a node's children are all nodes whose
//!   `parent_id` equals its `id`
//! - **Metadata lives beside the node**: key/value metadata is fetched and
//!   attached through the store, see [`super::Metadata`]
//!
//! # Examples
//!
//! ```rust
//! use pagetree_core::models::{NewNode, NodeStatus};
//!
//! let page = NewNode::page("About us", "<p>Hello</p>", None, "user-1")
//!     .with_status(NodeStatus::Published)
//!     .with_menu_order(3);
//!
//! assert_eq!(page.node_type, "page");
//! assert!(page.parent_id.is_none());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content type used for pages
pub const PAGE_NODE_TYPE: &str = "page";

/// Publication status of a node.
///
/// Duplicates are always created as [`NodeStatus::Draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Draft,
    Published,
    Pending,
    Private,
}

impl NodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Draft => "draft",
            NodeStatus::Published => "published",
            NodeStatus::Pending => "pending",
            NodeStatus::Private => "private",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(NodeStatus::Draft),
            "published" | "publish" => Ok(NodeStatus::Published),
            "pending" => Ok(NodeStatus::Pending),
            "private" => Ok(NodeStatus::Private),
            other => Err(format!("Unknown node status: {}", other)),
        }
    }
}

/// A page record as stored by the host.
///
/// # Fields
///
/// - `id`: Opaque unique identifier assigned by the store
/// - `node_type`: Content type (e.g., "page")
/// - `title` / `body`: Page title and content
/// - `status`: Publication status
/// - `parent_id`: Parent node reference (`None` for a root)
/// - `menu_order`: Sibling ordering value
/// - `author_id`: Author reference
/// - `created_at`: Creation timestamp assigned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,

    #[serde(default = "default_node_type")]
    pub node_type: String,

    pub title: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub status: NodeStatus,

    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub menu_order: i64,

    pub author_id: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_node_type() -> String {
    PAGE_NODE_TYPE.to_string()
}

impl Node {
    /// Build a stored node from creation fields plus the store-assigned identity.
    pub fn from_new(id: impl Into<String>, fields: NewNode, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            node_type: fields.node_type,
            title: fields.title,
            body: fields.body,
            status: fields.status,
            parent_id: fields.parent_id,
            menu_order: fields.menu_order,
            author_id: fields.author_id,
            created_at,
        }
    }

    /// `true` if this node has no parent
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Fields passed to the store when creating a node.
///
/// Mirrors [`Node`] minus the store-assigned `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNode {
    pub node_type: String,
    pub title: String,
    pub body: String,
    pub status: NodeStatus,
    pub parent_id: Option<String>,
    pub menu_order: i64,
    pub author_id: String,
}

impl NewNode {
    /// Create a draft page with `menu_order = 0`
    pub fn page(
        title: impl Into<String>,
        body: impl Into<String>,
        parent_id: Option<String>,
        author_id: impl Into<String>,
    ) -> Self {
        Self {
            node_type: PAGE_NODE_TYPE.to_string(),
            title: title.into(),
            body: body.into(),
            status: NodeStatus::Draft,
            parent_id,
            menu_order: 0,
            author_id: author_id.into(),
        }
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_menu_order(mut self, menu_order: i64) -> Self {
        self.menu_order = menu_order;
        self
    }
}

/// Identity of the user performing an operation.
///
/// Recorded as `author_id` on every node a duplication creates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActingUser(String);

impl ActingUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActingUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_lowercase() {
        let value = serde_json::to_value(NodeStatus::Published).unwrap();
        assert_eq!(value, json!("published"));

        let parsed: NodeStatus = serde_json::from_value(json!("private")).unwrap();
        assert_eq!(parsed, NodeStatus::Private);
    }

    #[test]
    fn test_status_from_str_accepts_publish_alias() {
        assert_eq!("publish".parse::<NodeStatus>().unwrap(), NodeStatus::Published);
        assert_eq!(" Draft ".parse::<NodeStatus>().unwrap(), NodeStatus::Draft);
        assert!("archived".parse::<NodeStatus>().is_err());
    }

    #[test]
    fn test_node_deserializes_with_defaults() {
        let node: Node = serde_json::from_value(json!({
            "id": "42",
            "title": "Home",
            "authorId": "admin"
        }))
        .unwrap();

        assert_eq!(node.node_type, PAGE_NODE_TYPE);
        assert_eq!(node.status, NodeStatus::Draft);
        assert_eq!(node.menu_order, 0);
        assert!(node.is_root());
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let fields = NewNode::page("Team", "body", Some("1".to_string()), "u-7")
            .with_status(NodeStatus::Pending)
            .with_menu_order(5);
        let now = Utc::now();
        let node = Node::from_new("99", fields, now);

        assert_eq!(node.id, "99");
        assert_eq!(node.title, "Team");
        assert_eq!(node.status, NodeStatus::Pending);
        assert_eq!(node.parent_id.as_deref(), Some("1"));
        assert_eq!(node.menu_order, 5);
        assert_eq!(node.author_id, "u-7");
        assert_eq!(node.created_at, now);
        assert!(!node.is_root());
    }

    #[test]
    fn test_acting_user_is_transparent() {
        let user = ActingUser::new("editor-3");
        assert_eq!(serde_json::to_value(&user).unwrap(), json!("editor-3"));
        assert_eq!(user.to_string(), "editor-3");
    }
}

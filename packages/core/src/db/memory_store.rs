//! In-memory `NodeStore`
//!
//! A complete host store kept in process memory. Used by tests, benchmarks
//! and the `dev-duplicate` tool, which loads and saves it as a JSON
//! [`StoreSnapshot`].

use crate::db::{NodeStore, StoreError};
use crate::models::{Metadata, NewNode, Node};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Serializable contents of a [`MemoryStore`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Metadata>,
}

impl StoreSnapshot {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    nodes: HashMap<String, Node>,
    metadata: HashMap<String, Metadata>,
}

/// Node store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot.
    ///
    /// Node ids must be unique, every non-null `parent_id` must reference a
    /// node in the snapshot, and metadata may only be keyed by known node ids.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, StoreError> {
        let mut nodes: HashMap<String, Node> = HashMap::with_capacity(snapshot.nodes.len());
        for node in snapshot.nodes {
            if nodes.contains_key(&node.id) {
                return Err(StoreError::rejected(format!("duplicate node id {}", node.id)));
            }
            nodes.insert(node.id.clone(), node);
        }

        for node in nodes.values() {
            if let Some(parent_id) = &node.parent_id {
                if !nodes.contains_key(parent_id) {
                    return Err(StoreError::invalid_parent(parent_id.clone()));
                }
            }
        }

        let mut metadata = HashMap::with_capacity(snapshot.metadata.len());
        for (id, entries) in snapshot.metadata {
            if !nodes.contains_key(&id) {
                return Err(StoreError::rejected(format!("metadata for unknown node {}", id)));
            }
            metadata.insert(id, entries);
        }

        Ok(Self {
            state: RwLock::new(StoreState { nodes, metadata }),
        })
    }

    /// Export the current contents, nodes ordered by creation time then ID
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        let mut nodes: Vec<Node> = state.nodes.values().cloned().collect();
        nodes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        StoreSnapshot {
            nodes,
            metadata: state
                .metadata
                .iter()
                .map(|(id, m)| (id.clone(), m.clone()))
                .collect(),
        }
    }

    /// Insert a node with a caller-chosen ID (fixture seeding)
    pub async fn insert_node(&self, node: Node) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if let Some(parent_id) = &node.parent_id {
            if !state.nodes.contains_key(parent_id) {
                return Err(StoreError::invalid_parent(parent_id.clone()));
            }
        }
        state.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// All nodes, in no particular order
    pub async fn all_nodes(&self) -> Vec<Node> {
        self.state.read().await.nodes.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.nodes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.nodes.is_empty()
    }
}

#[async_trait]
impl NodeStore for MemoryStore {
    async fn get_node(&self, id: &str) -> Result<Option<Node>> {
        Ok(self.state.read().await.nodes.get(id).cloned())
    }

    async fn create_node(&self, fields: NewNode) -> Result<String> {
        let mut state = self.state.write().await;
        if let Some(parent_id) = &fields.parent_id {
            if !state.nodes.contains_key(parent_id) {
                return Err(StoreError::invalid_parent(parent_id.clone()).into());
            }
        }

        let id = Uuid::new_v4().to_string();
        let node = Node::from_new(id.clone(), fields, Utc::now());
        state.nodes.insert(id.clone(), node);
        Ok(id)
    }

    async fn get_metadata(&self, id: &str) -> Result<Metadata> {
        let state = self.state.read().await;
        Ok(state.metadata.get(id).cloned().unwrap_or_default())
    }

    async fn add_metadata(&self, id: &str, key: &str, value: Value) -> Result<()> {
        let mut state = self.state.write().await;
        if !state.nodes.contains_key(id) {
            return Err(StoreError::node_not_found(id).into());
        }
        state
            .metadata
            .entry(id.to_string())
            .or_default()
            .entry(key.to_string())
            .or_default()
            .push(value);
        Ok(())
    }

    async fn get_children(&self, parent_id: &str) -> Result<Vec<Node>> {
        let state = self.state.read().await;
        let mut children: Vec<Node> = state
            .nodes
            .values()
            .filter(|node| node.parent_id.as_deref() == Some(parent_id))
            .cloned()
            .collect();

        // Host default page order: menu_order, then title
        children.sort_by(|a, b| {
            a.menu_order
                .cmp(&b.menu_order)
                .then_with(|| a.title.cmp(&b.title))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeStatus;
    use serde_json::json;

    fn fixture(id: &str, parent: Option<&str>, order: i64) -> Node {
        Node::from_new(
            id,
            NewNode::page(format!("Page {}", id), "", parent.map(String::from), "admin")
                .with_menu_order(order),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_rejects_missing_parent() {
        let store = MemoryStore::new();
        let id = store
            .create_node(NewNode::page("Root", "", None, "admin"))
            .await
            .unwrap();
        assert!(store.get_node(&id).await.unwrap().is_some());

        let err = store
            .create_node(NewNode::page("Orphan", "", Some("missing".into()), "admin"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidParent { .. })
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_metadata_appends_values() {
        let store = MemoryStore::new();
        store.insert_node(fixture("1", None, 0)).await.unwrap();

        store.add_metadata("1", "tag", json!("a")).await.unwrap();
        store.add_metadata("1", "tag", json!("b")).await.unwrap();

        let metadata = store.get_metadata("1").await.unwrap();
        assert_eq!(metadata["tag"], vec![json!("a"), json!("b")]);
        assert!(store.get_metadata("nope").await.unwrap().is_empty());
        assert!(store.add_metadata("nope", "k", json!(1)).await.is_err());
    }

    #[tokio::test]
    async fn test_children_sorted_by_menu_order() {
        let store = MemoryStore::new();
        store.insert_node(fixture("r", None, 0)).await.unwrap();
        store.insert_node(fixture("c", Some("r"), 2)).await.unwrap();
        store.insert_node(fixture("a", Some("r"), 1)).await.unwrap();
        store.insert_node(fixture("b", Some("r"), 1)).await.unwrap();
        store.insert_node(fixture("x", Some("a"), 0)).await.unwrap();

        let ids: Vec<String> = store
            .get_children("r")
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_snapshot_round_trip_through_json() {
        let store = MemoryStore::new();
        let mut root = fixture("r", None, 0);
        root.status = NodeStatus::Published;
        store.insert_node(root).await.unwrap();
        store.insert_node(fixture("c", Some("r"), 0)).await.unwrap();
        store.add_metadata("c", "layout", json!({"cols": 2})).await.unwrap();

        let json = store.snapshot().await.to_json_pretty().unwrap();
        let restored = MemoryStore::from_snapshot(StoreSnapshot::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored.len().await, 2);
        let root = restored.get_node("r").await.unwrap().unwrap();
        assert_eq!(root.status, NodeStatus::Published);
        assert_eq!(
            restored.get_metadata("c").await.unwrap()["layout"],
            vec![json!({"cols": 2})]
        );
    }

    #[test]
    fn test_snapshot_with_dangling_parent_is_rejected() {
        let snapshot = StoreSnapshot {
            nodes: vec![fixture("c", Some("gone"), 0)],
            metadata: BTreeMap::new(),
        };
        assert!(matches!(
            MemoryStore::from_snapshot(snapshot),
            Err(StoreError::InvalidParent { .. })
        ));
    }

    #[test]
    fn test_snapshot_with_duplicate_id_is_rejected() {
        let mut second = fixture("a", None, 0);
        second.title = "Second A".to_string();
        let snapshot = StoreSnapshot {
            nodes: vec![fixture("a", None, 0), second],
            metadata: BTreeMap::new(),
        };

        match MemoryStore::from_snapshot(snapshot) {
            Err(StoreError::Rejected(msg)) => assert_eq!(msg, "duplicate node id a"),
            other => panic!("expected Rejected, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_snapshot_with_orphan_metadata_is_rejected() {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            "ghost".to_string(),
            Metadata::from([("tag".to_string(), vec![json!("x")])]),
        );
        let snapshot = StoreSnapshot {
            nodes: vec![fixture("a", None, 0)],
            metadata,
        };

        match MemoryStore::from_snapshot(snapshot) {
            Err(StoreError::Rejected(msg)) => assert_eq!(msg, "metadata for unknown node ghost"),
            other => panic!("expected Rejected, got {:?}", other.map(|_| ())),
        }
    }
}

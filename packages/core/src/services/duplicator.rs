//! Tree Duplicator
//!
//! Copies a page and all of its descendants through a [`NodeStore`]:
//!
//! - Each copy gets the source's type, body and `menu_order`, the source
//!   title plus the copy suffix, `Draft` status, and the acting user as author
//! - All metadata is copied key by key and value by value, with serialized
//!   structured values decoded first (see [`maybe_unserialize`])
//! - Children are duplicated depth-first under the new parent, so the copy
//!   has the same shape as the source tree
//!
//! # Failure Handling
//!
//! A failure on the root fails the whole call and nothing is created. Below
//! the root the [`DuplicationMode`] decides:
//!
//! - `Lenient`: the failed node and its subtree are skipped, siblings go on
//! - `Strict`: the walk stops and returns `DuplicationError::Aborted`
//!
//! Nothing is rolled back in either mode. Metadata failures on a copy that
//! already exists are logged and counted, never fatal.
//!
//! # Examples
//!
//! ```rust
//! use pagetree_core::db::{MemoryStore, NodeStore};
//! use pagetree_core::models::{ActingUser, NewNode};
//! use pagetree_core::services::TreeDuplicator;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let root = store.create_node(NewNode::page("Docs", "", None, "alice")).await?;
//! store
//!     .create_node(NewNode::page("Install", "", Some(root.clone()), "alice"))
//!     .await?;
//!
//! let duplicator = TreeDuplicator::new(store.clone());
//! let report = duplicator.duplicate_tree(&root, &ActingUser::new("bob")).await?;
//!
//! assert_eq!(report.created_count(), 2);
//! let copy = store.get_node(&report.new_root_id).await?.unwrap();
//! assert_eq!(copy.title, "Docs (Copy)");
//! assert_eq!(copy.author_id, "bob");
//! # Ok(())
//! # }
//! ```

use crate::config::{DuplicationMode, DuplicatorConfig};
use crate::db::NodeStore;
use crate::models::{
    maybe_unserialize, metadata_value_count, ActingUser, DuplicationReport, NewNode, NodeStatus,
};
use crate::services::error::DuplicationError;
use std::collections::HashSet;
use std::sync::Arc;

/// A copy that was created, with how many metadata operations failed on it
struct NodeCopy {
    copy_id: String,
    metadata_failures: usize,
}

/// Recursive page tree duplication over a host store
#[derive(Clone)]
pub struct TreeDuplicator {
    store: Arc<dyn NodeStore>,
    config: DuplicatorConfig,
}

impl TreeDuplicator {
    /// Create a duplicator with the default (lenient) configuration
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self {
            store,
            config: DuplicatorConfig::default(),
        }
    }

    /// Create a duplicator with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn with_config(
        store: Arc<dyn NodeStore>,
        config: DuplicatorConfig,
    ) -> Result<Self, DuplicationError> {
        config.validate().map_err(DuplicationError::invalid_config)?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &DuplicatorConfig {
        &self.config
    }

    /// Duplicate `root_id` and every node below it.
    ///
    /// The root copy is created without a parent. On success the returned
    /// report lists every copy (root first) and, in lenient mode, every
    /// subtree that was skipped.
    ///
    /// # Errors
    ///
    /// - `NotFound` / `CreationFailed` if the root itself could not be copied;
    ///   nothing is created in that case
    /// - `Aborted` in strict mode when any node below the root fails
    pub async fn duplicate_tree(
        &self,
        root_id: &str,
        acting_user: &ActingUser,
    ) -> Result<DuplicationReport, DuplicationError> {
        tracing::info!(
            "Duplicating tree rooted at {} for user {} ({} mode)",
            root_id,
            acting_user,
            self.config.mode
        );

        let root_copy = self.copy_node(root_id, None, acting_user).await?;

        let mut report = DuplicationReport::new(root_id, &root_copy.copy_id);
        report.metadata_failures += root_copy.metadata_failures;

        let mut visited = HashSet::from([root_id.to_string()]);
        self.walk_subtree(root_id, &root_copy.copy_id, acting_user, &mut report, &mut visited)
            .await?;

        if report.is_complete() {
            tracing::info!(
                "Duplicated {} nodes: {} -> {}",
                report.created_count(),
                root_id,
                report.new_root_id
            );
        } else {
            tracing::warn!(
                "Duplicated {} nodes: {} -> {} ({} subtrees skipped, {} metadata failures)",
                report.created_count(),
                root_id,
                report.new_root_id,
                report.skipped.len(),
                report.metadata_failures
            );
        }

        Ok(report)
    }

    /// Copy a single node (and its metadata) under `new_parent_id`.
    ///
    /// Returns the ID of the new node. Children are not touched.
    pub async fn duplicate_node(
        &self,
        source_id: &str,
        new_parent_id: Option<&str>,
        acting_user: &ActingUser,
    ) -> Result<String, DuplicationError> {
        self.copy_node(source_id, new_parent_id, acting_user)
            .await
            .map(|copy| copy.copy_id)
    }

    /// Duplicate every descendant of `source_root_id` under the existing
    /// copy `new_root_id`, recording results in `report`.
    ///
    /// Source nodes already listed in `report.copied` are treated as visited.
    pub async fn duplicate_subtree(
        &self,
        source_root_id: &str,
        new_root_id: &str,
        acting_user: &ActingUser,
        report: &mut DuplicationReport,
    ) -> Result<(), DuplicationError> {
        let mut visited: HashSet<String> = report
            .copied
            .iter()
            .map(|c| c.source_id.clone())
            .collect();
        visited.insert(source_root_id.to_string());

        self.walk_subtree(source_root_id, new_root_id, acting_user, report, &mut visited)
            .await
    }

    async fn walk_subtree(
        &self,
        source_parent_id: &str,
        copy_parent_id: &str,
        acting_user: &ActingUser,
        report: &mut DuplicationReport,
        visited: &mut HashSet<String>,
    ) -> Result<(), DuplicationError> {
        let children = match self.store.get_children(source_parent_id).await {
            Ok(children) => children,
            Err(e) => {
                // The node itself was copied; only its descendants are lost
                return self.handle_failure(
                    source_parent_id,
                    format!("children not copied: failed to list children: {}", e),
                    report,
                );
            }
        };

        for child in children {
            if self.config.guard_cycles && !visited.insert(child.id.clone()) {
                self.handle_failure(&child.id, "cycle: node already visited in this walk", report)?;
                continue;
            }

            match self.copy_node(&child.id, Some(copy_parent_id), acting_user).await {
                Ok(copy) => {
                    report.record_copy(&child.id, &copy.copy_id);
                    report.metadata_failures += copy.metadata_failures;

                    // Box::pin keeps the recursive future finitely sized
                    Box::pin(self.walk_subtree(
                        &child.id,
                        &copy.copy_id,
                        acting_user,
                        report,
                        visited,
                    ))
                    .await?;
                }
                Err(e) => self.handle_failure(&child.id, e.to_string(), report)?,
            }
        }

        Ok(())
    }

    fn handle_failure(
        &self,
        source_id: &str,
        reason: impl Into<String>,
        report: &mut DuplicationReport,
    ) -> Result<(), DuplicationError> {
        let reason = reason.into();
        match self.config.mode {
            DuplicationMode::Lenient => {
                tracing::warn!("Skipping subtree at {}: {}", source_id, reason);
                report.record_skip(source_id, reason);
                Ok(())
            }
            DuplicationMode::Strict => {
                tracing::warn!("Aborting duplication at {}: {}", source_id, reason);
                Err(DuplicationError::aborted(
                    source_id,
                    reason,
                    report.created_ids(),
                    report.metadata_failures,
                ))
            }
        }
    }

    async fn copy_node(
        &self,
        source_id: &str,
        new_parent_id: Option<&str>,
        acting_user: &ActingUser,
    ) -> Result<NodeCopy, DuplicationError> {
        let source = match self.store.get_node(source_id).await {
            Ok(Some(node)) => node,
            Ok(None) => return Err(DuplicationError::not_found(source_id)),
            Err(e) => {
                tracing::warn!("Failed to read node {}: {}", source_id, e);
                return Err(DuplicationError::not_found(source_id));
            }
        };

        let fields = NewNode {
            node_type: source.node_type,
            title: format!("{}{}", source.title, self.config.copy_suffix),
            body: source.body,
            status: NodeStatus::Draft,
            parent_id: new_parent_id.map(str::to_string),
            menu_order: source.menu_order,
            author_id: acting_user.id().to_string(),
        };

        let copy_id = self
            .store
            .create_node(fields)
            .await
            .map_err(|e| DuplicationError::creation_failed(source_id, e.to_string()))?;

        tracing::debug!("Created {} as copy of {}", copy_id, source_id);

        let metadata_failures = self.copy_metadata(source_id, &copy_id).await;

        Ok(NodeCopy {
            copy_id,
            metadata_failures,
        })
    }

    /// Copy every metadata value; returns the number of failed operations
    async fn copy_metadata(&self, source_id: &str, copy_id: &str) -> usize {
        let metadata = match self.store.get_metadata(source_id).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("Failed to read metadata for node {}: {}", source_id, e);
                return 1;
            }
        };

        let mut failures = 0;
        for (key, values) in &metadata {
            for value in values {
                if let Err(e) = self
                    .store
                    .add_metadata(copy_id, key, maybe_unserialize(value))
                    .await
                {
                    tracing::warn!(
                        "Failed to copy metadata '{}' from {} to {}: {}",
                        key,
                        source_id,
                        copy_id,
                        e
                    );
                    failures += 1;
                }
            }
        }

        tracing::debug!(
            "Copied {} of {} metadata values from {} to {}",
            metadata_value_count(&metadata) - failures,
            metadata_value_count(&metadata),
            source_id,
            copy_id
        );

        failures
    }
}

// Comprehensive tests in separate module
#[cfg(test)]
#[path = "duplicator_test.rs"]
mod duplicator_test;

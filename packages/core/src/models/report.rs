//! Duplication result types

use serde::{Deserialize, Serialize};

/// A source node and the copy created for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopiedNode {
    pub source_id: String,
    pub copy_id: String,
}

/// A source node whose subtree was not duplicated
///
/// When listing a node's children fails, the node itself has already been
/// copied: it appears in `DuplicationReport::copied` as well, and `reason`
/// starts with "children not copied".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedNode {
    pub source_id: String,
    pub reason: String,
}

/// Outcome of a tree duplication.
///
/// `copied` is in creation order, so the first entry is always the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicationReport {
    pub source_root_id: String,
    pub new_root_id: String,
    pub copied: Vec<CopiedNode>,
    pub skipped: Vec<SkippedNode>,
    /// Metadata reads or writes that failed on already-created copies
    pub metadata_failures: usize,
}

impl DuplicationReport {
    pub fn new(source_root_id: impl Into<String>, new_root_id: impl Into<String>) -> Self {
        let source_root_id = source_root_id.into();
        let new_root_id = new_root_id.into();
        Self {
            copied: vec![CopiedNode {
                source_id: source_root_id.clone(),
                copy_id: new_root_id.clone(),
            }],
            source_root_id,
            new_root_id,
            skipped: Vec::new(),
            metadata_failures: 0,
        }
    }

    pub fn record_copy(&mut self, source_id: impl Into<String>, copy_id: impl Into<String>) {
        self.copied.push(CopiedNode {
            source_id: source_id.into(),
            copy_id: copy_id.into(),
        });
    }

    pub fn record_skip(&mut self, source_id: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedNode {
            source_id: source_id.into(),
            reason: reason.into(),
        });
    }

    /// Number of nodes created, root included
    pub fn created_count(&self) -> usize {
        self.copied.len()
    }

    /// `true` when nothing was skipped and all metadata was copied
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.metadata_failures == 0
    }

    /// Ids of every copy created so far
    pub fn created_ids(&self) -> Vec<String> {
        self.copied.iter().map(|c| c.copy_id.clone()).collect()
    }

    /// Copy id for a given source id, if one was created
    pub fn copy_of(&self, source_id: &str) -> Option<&str> {
        self.copied
            .iter()
            .find(|c| c.source_id == source_id)
            .map(|c| c.copy_id.as_str())
    }
}

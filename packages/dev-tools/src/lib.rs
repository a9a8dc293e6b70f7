//! PageTree development tools
//!
//! Runs a tree duplication against a JSON store snapshot, standing in for the
//! host's admin action during development.

use anyhow::{Context, Result};
use clap::Parser;
use pagetree_core::{
    ActingUser, DuplicationReport, DuplicatorConfig, MemoryStore, StoreSnapshot, TreeDuplicator,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Duplicate a page tree from a JSON store snapshot
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "dev-duplicate", version, about)]
pub struct DuplicateArgs {
    /// Store snapshot to load
    pub snapshot_path: PathBuf,

    /// ID of the root page to duplicate
    #[arg(value_parser = non_empty_id)]
    pub root_id: String,

    /// User recorded as author of every copy
    pub acting_user: String,

    /// Write the store snapshot after duplication to this path
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

fn non_empty_id(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        return Err("root-id cannot be empty".to_string());
    }
    Ok(raw.to_string())
}

/// Load a snapshot file into a fresh in-memory store
pub async fn load_store(path: &Path) -> Result<MemoryStore> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = StoreSnapshot::from_json(&raw)?;
    Ok(MemoryStore::from_snapshot(snapshot)?)
}

/// Run one duplication and optionally write the resulting snapshot
pub async fn run(args: &DuplicateArgs, config: DuplicatorConfig) -> Result<DuplicationReport> {
    let store = Arc::new(load_store(&args.snapshot_path).await?);
    tracing::info!(
        "Loaded {} nodes from {}",
        store.len().await,
        args.snapshot_path.display()
    );

    let duplicator = TreeDuplicator::with_config(store.clone(), config)?;
    let report = duplicator
        .duplicate_tree(&args.root_id, &ActingUser::new(args.acting_user.clone()))
        .await?;

    if let Some(out) = &args.out {
        let json = store.snapshot().await.to_json_pretty()?;
        tokio::fs::write(out, json)
            .await
            .with_context(|| format!("Failed to write snapshot {}", out.display()))?;
        tracing::info!("Wrote snapshot to {}", out.display());
    }

    Ok(report)
}

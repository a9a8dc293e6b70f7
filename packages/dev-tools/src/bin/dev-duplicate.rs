//! Snapshot Duplication Runner
//!
//! Loads a JSON store snapshot, duplicates one page tree, and prints the
//! duplication report as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin dev-duplicate -- pages.json 42 admin --out pages-after.json
//!
//! # Abort on the first failed page instead of skipping it
//! PAGETREE_MODE=strict cargo run --bin dev-duplicate -- pages.json 42 admin
//! ```
//!
//! # Environment Variables
//!
//! - `PAGETREE_MODE`: `lenient` (default) or `strict`
//! - `PAGETREE_COPY_SUFFIX`: Title suffix for copies (default: " (Copy)")
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use clap::Parser;
use pagetree_core::DuplicatorConfig;
use pagetree_dev_tools::{run, DuplicateArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = DuplicateArgs::parse();
    let config = DuplicatorConfig::from_env().map_err(anyhow::Error::msg)?;

    tracing::info!("Mode: {}", config.mode);

    let report = run(&args, config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

//! scopediff
//!
//! Fetches the same resource from every configured scope for each key in
//! the input file and reports whether the responses are semantically
//! equivalent, one TSV line per key.
//!
//! Usage: `scopediff [CONFIG_PATH]` (default `config_file.json`). Missing
//! or malformed configuration is fatal; per-item failures only mark that
//! item's line as an error.

use anyhow::Result;
use sd_config::{RunConfig, DEFAULT_CONFIG_PATH};
use std::env;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = RunConfig::load(&config_path)?;

    let summary = sd_pipeline::run(config).await?;
    info!(
        "compared {} keys, wrote {} records to {:?}",
        summary.keys_read, summary.records_written, summary.output_path
    );

    Ok(())
}

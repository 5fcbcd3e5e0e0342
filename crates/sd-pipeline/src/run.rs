//! Orchestrator: wires source, workers, and sink, and runs the shutdown
//! barrier

use crate::error::{PipelineError, SourceError};
use crate::{sink, source, worker};
use chrono::Local;
use sd_client::Fetcher;
use sd_config::RunConfig;
use sd_core::{OutcomeRecord, RequestKey};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tokio::fs::File;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info};

/// Timestamp pattern for the default output filename
const OUTPUT_TIMESTAMP: &str = "%Y_%m_%d_%H_%M_%S";

/// What a completed run produced
#[derive(Debug)]
pub struct RunSummary {
    /// Keys the item source yielded after skip and filter
    pub keys_read: usize,
    /// Data lines the sink wrote
    pub records_written: usize,
    /// Where the TSV output landed
    pub output_path: PathBuf,
}

/// Run the whole pipeline, writing to a timestamp-named `.tsv` file in the
/// working directory
pub async fn run(config: RunConfig) -> Result<RunSummary, PipelineError> {
    let output_path = PathBuf::from(format!("{}.tsv", Local::now().format(OUTPUT_TIMESTAMP)));
    run_to(config, &output_path).await
}

/// Run the whole pipeline, writing to the given destination
///
/// Worker count is the available hardware parallelism. Cross-task handoff
/// uses capacity-1 channels, so the source is throttled to the pool's
/// consumption rate. Shutdown is a two-phase barrier: join every worker,
/// close the result channel, join the sink. Task panics surface as join
/// errors and are logged; they can never leave the barrier waiting.
pub async fn run_to(config: RunConfig, output_path: &Path) -> Result<RunSummary, PipelineError> {
    let worker_count = thread::available_parallelism().map(usize::from).unwrap_or(1);
    let fetcher = Fetcher::new(&config.headers, config.status_policy)?;
    let scopes = Arc::new(config.scopes);

    info!("Opening input file: {}", config.filename);
    let input = File::open(&config.filename)
        .await
        .map_err(|source| PipelineError::OpenInput {
            path: PathBuf::from(&config.filename),
            source,
        })?;

    let (work_tx, work_rx) = mpsc::channel::<RequestKey>(1);
    let (result_tx, result_rx) = mpsc::channel::<OutcomeRecord>(1);
    let work_rx = Arc::new(Mutex::new(work_rx));

    let source_handle = tokio::spawn(source::produce_keys(input, config.skip_lines, work_tx));
    let sink_handle = tokio::spawn(sink::write_outcomes(output_path.to_path_buf(), result_rx));

    info!("starting with {} workers", worker_count);
    let worker_handles: Vec<_> = (0..worker_count)
        .map(|worker_id| {
            tokio::spawn(worker::run_worker(
                worker_id,
                fetcher.clone(),
                scopes.clone(),
                work_rx.clone(),
                result_tx.clone(),
            ))
        })
        .collect();
    // Workers hold the only result senders now; once they all finish, the
    // sink sees end-of-stream.
    drop(result_tx);

    // Phase one: every worker signals completion through its JoinHandle,
    // which resolves even if the task panicked.
    for handle in worker_handles {
        match handle.await {
            Ok(()) => info!("worker done"),
            Err(fault) => error!("worker task failed: {}", fault),
        }
    }

    // Phase two: the result channel is closed, wait for the sink to drain.
    let records_written = match sink_handle.await {
        Ok(result) => result?,
        Err(fault) => {
            error!("writer task failed: {}", fault);
            0
        }
    };
    info!("writer done");

    // The source finished before the workers could (its channel had to
    // drain); report whether it ended cleanly.
    let keys_read = match source_handle.await {
        Ok(Ok(keys_read)) => keys_read,
        Ok(Err(fault)) => {
            error!("input ended early: {}", fault);
            let SourceError::Read { keys_yielded, .. } = fault;
            keys_yielded
        }
        Err(fault) => {
            error!("reader task failed: {}", fault);
            0
        }
    };

    Ok(RunSummary {
        keys_read,
        records_written,
        output_path: output_path.to_path_buf(),
    })
}

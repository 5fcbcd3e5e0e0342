//! Worker pool: per-key cross-scope fetch fan-out and comparison

use crate::PROGRESS_INTERVAL;
use futures::future::join_all;
use sd_client::Fetcher;
use sd_compare::verdict;
use sd_core::{OutcomeKind, OutcomeRecord, RequestKey, ScopeSet};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

/// Worker-local running totals, used only for progress logging
///
/// Counters are never shared or aggregated across workers.
struct RunCounters {
    total: usize,
    ok: usize,
}

impl RunCounters {
    fn new() -> Self {
        Self { total: 0, ok: 0 }
    }

    fn record(&mut self, kind: OutcomeKind) {
        self.total += 1;
        if kind == OutcomeKind::Ok {
            self.ok += 1;
        }
    }

    fn log(&self, worker_id: usize) {
        let pct = self.ok as f32 * 100.0 / self.total as f32;
        info!("worker {}: {}\t{}\t{:.2}%", worker_id, self.ok, self.total, pct);
    }
}

/// One worker's loop: pull keys from the shared work channel until it closes
///
/// Per key: one fetch per scope, all concurrent, joined before comparison
/// (the join blocks only this worker); then the pairwise verdict walk; then
/// exactly one outcome record sent downstream. A fetch or comparison failure
/// is terminal only for that key.
pub(crate) async fn run_worker(
    worker_id: usize,
    fetcher: Fetcher,
    scopes: Arc<ScopeSet>,
    work: Arc<Mutex<mpsc::Receiver<RequestKey>>>,
    results: mpsc::Sender<OutcomeRecord>,
) {
    let mut counters = RunCounters::new();

    loop {
        // Hold the receiver lock only for the handoff, not for the fetches.
        let key = match work.lock().await.recv().await {
            Some(key) => key,
            None => break,
        };

        let record = process_key(&fetcher, &scopes, key).await;
        counters.record(record.kind);

        if results.send(record).await.is_err() {
            warn!("worker {}: result channel closed, stopping", worker_id);
            break;
        }
        if counters.total % PROGRESS_INTERVAL == 0 {
            counters.log(worker_id);
        }
    }

    if counters.total > 0 {
        counters.log(worker_id);
    }
}

/// Fan out one fetch per scope, join them all, and compare pairwise
async fn process_key(fetcher: &Fetcher, scopes: &ScopeSet, key: RequestKey) -> OutcomeRecord {
    let snapshots = join_all(scopes.iter().map(|scope| fetcher.fetch(scope, &key))).await;
    verdict(key, &snapshots)
}

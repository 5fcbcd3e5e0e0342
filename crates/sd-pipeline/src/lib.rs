//! Concurrent fetch-compare-report pipeline for scopediff
//!
//! Wires the item source, worker pool, and result sink into one run:
//!
//! ```text
//! item source ──(work channel)──▶ worker pool ──(result channel)──▶ sink
//! ```
//!
//! Data flows strictly one direction. The source streams request keys from
//! the input file; N workers each pull a key, fetch it from every scope in
//! parallel, and compare the snapshots pairwise; a single sink task writes
//! one TSV line per key. Shutdown is a two-phase barrier: join all workers,
//! close the result channel, then join the sink.

mod error;
mod run;
mod sink;
mod source;
mod worker;

pub use error::{PipelineError, SinkError, SourceError};
pub use run::{run, run_to, RunSummary};
pub use source::parse_record;

/// How often (in processed records) the source and each worker log progress
const PROGRESS_INTERVAL: usize = 1000;

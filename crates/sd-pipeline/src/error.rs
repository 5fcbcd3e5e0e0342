//! Error types for the pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Terminal result of the item source task
///
/// A read failure is distinguishable from clean end-of-input: the source
/// reports how many keys it had already yielded, and those remain valid
/// work that the rest of the pipeline has processed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input read failed after {keys_yielded} keys: {source}")]
    Read {
        keys_yielded: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the result sink task
///
/// Only failing to create the destination is an error; individual write
/// failures are logged and the run continues.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed creating output file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors for a whole run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input file could not be opened
    #[error("failed to open input file {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured headers could not form an HTTP client
    #[error(transparent)]
    Fetcher(#[from] sd_client::FetcherBuildError),

    /// The output file could not be created
    #[error(transparent)]
    Sink(#[from] SinkError),
}

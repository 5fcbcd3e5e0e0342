//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading the run configuration
///
/// All of these are fatal at startup: a run never starts with a partial
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the config file as JSON
    #[error("failed to parse config file {path}: {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The scope list is missing entries or contains blanks
    #[error("invalid scopes: {source}")]
    InvalidScopes {
        #[source]
        source: sd_core::ScopeSetError,
    },

    /// The bearer token is empty
    #[error("token must not be empty")]
    EmptyToken,

    /// The input filename is empty
    #[error("filename must not be empty")]
    EmptyFilename,
}

//! Run configuration for scopediff
//!
//! Loads the JSON config file naming the bearer token, the scope list, any
//! extra headers, the input file, and how many of its leading lines to skip.
//! Everything is validated once at startup; the resulting [`RunConfig`] is
//! immutable for the rest of the run.

mod error;

pub use error::{ConfigError, ConfigResult};

use sd_core::{HeaderSet, ScopeSet, StatusPolicy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default config file path when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config_file.json";

/// Raw shape of the JSON config file
#[derive(Debug, Deserialize)]
struct RawConfig {
    token: String,
    scopes: Vec<String>,
    headers: BTreeMap<String, String>,
    skip_lines: usize,
    filename: String,
    #[serde(default)]
    status_policy: StatusPolicy,
}

/// Validated run configuration
///
/// `headers` already contains the token under [`sd_core::AUTH_HEADER`], with
/// the configured extra headers merged over it.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Ordered base-URL prefixes of the deployments under comparison
    pub scopes: ScopeSet,

    /// Headers attached to every fetch
    pub headers: HeaderSet,

    /// Leading input lines to skip unconditionally
    pub skip_lines: usize,

    /// Path of the input file listing the keys to compare
    pub filename: String,

    /// How the fetcher interprets non-200 statuses
    pub status_policy: StatusPolicy,
}

impl RunConfig {
    /// Load and validate the config file at `path`
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("Loading config file: {:?}", path);

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?;

        if raw.token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        if raw.filename.is_empty() {
            return Err(ConfigError::EmptyFilename);
        }
        let scopes =
            ScopeSet::new(raw.scopes).map_err(|source| ConfigError::InvalidScopes { source })?;
        let headers = HeaderSet::build(&raw.token, raw.headers);

        Ok(Self {
            scopes,
            headers,
            skip_lines: raw.skip_lines,
            filename: raw.filename,
            status_policy: raw.status_policy,
        })
    }
}

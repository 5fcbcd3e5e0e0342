//! Per-item outcome records written by the result sink

use crate::RequestKey;
use std::fmt;

/// The verdict for one processed key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Ok,
    Error,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Ok => f.write_str("ok"),
            OutcomeKind::Error => f.write_str("error"),
        }
    }
}

/// The per-item verdict produced by comparing all scopes' responses for one
/// key
///
/// Exactly one record exists per key that entered the worker pool; the sink
/// writes each record as one tab-separated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub kind: OutcomeKind,
    pub key: RequestKey,
    pub message: String,
}

impl OutcomeRecord {
    /// Record for a key on which every scope pair agreed
    pub fn ok(key: RequestKey) -> Self {
        Self {
            kind: OutcomeKind::Ok,
            key,
            message: String::new(),
        }
    }

    /// Record for a key on which a scope pair disagreed or a fetch failed
    pub fn error(key: RequestKey, message: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Error,
            key,
            message: message.into(),
        }
    }

    /// Render as one TSV data line (no trailing newline)
    pub fn to_tsv_line(&self) -> String {
        format!("{}\t{}\t{}", self.kind, self.key, self.message)
    }
}

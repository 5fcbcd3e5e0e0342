//! ResponseSnapshot and fetch failure types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a non-200 status is interpreted by the fetcher
///
/// `Lenient` records the status and leaves judgment to the comparator;
/// `Strict` turns any non-200 into a fetch failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    #[default]
    Lenient,
    Strict,
}

/// A failure captured while fetching one (scope, key) pair
///
/// Fetch failures are data, not control flow: they are recorded in the
/// snapshot and turn only that item's outcome into an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The scope prefix and key did not combine into a valid request
    #[error("invalid request for '{url}': {reason}")]
    InvalidRequest { url: String, reason: String },

    /// Connection or other transport-level failure
    #[error("transport error for '{url}': {reason}")]
    Transport { url: String, reason: String },

    /// Reading the response body failed mid-stream
    #[error("body read error for '{url}': {reason}")]
    BodyRead { url: String, reason: String },

    /// Non-200 status under the strict status policy
    #[error("NOT 200 - StatusCode {status}")]
    UnexpectedStatus { status: u16 },
}

/// Everything captured from fetching one (scope, key) pair
///
/// Produced once by the fetcher and consumed once by the comparator within
/// the same worker. `status` is `None` only when the request never got a
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSnapshot {
    /// HTTP status code, if a response was received
    pub status: Option<u16>,

    /// The full response body
    pub body: Vec<u8>,

    /// Failure captured during the fetch, if any
    pub failure: Option<FetchError>,
}

impl ResponseSnapshot {
    /// Snapshot for a successfully received response
    pub fn received(status: u16, body: Vec<u8>) -> Self {
        Self {
            status: Some(status),
            body,
            failure: None,
        }
    }

    /// Snapshot for a failed fetch
    pub fn failed(failure: FetchError) -> Self {
        let status = match &failure {
            FetchError::UnexpectedStatus { status } => Some(*status),
            _ => None,
        };
        Self {
            status,
            body: Vec::new(),
            failure: Some(failure),
        }
    }
}

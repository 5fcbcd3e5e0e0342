//! HTTP fetcher for scopediff
//!
//! The [`Fetcher`] performs one GET against one scope+key and captures the
//! result as a [`ResponseSnapshot`]. Fetch failures are data, never `Err`:
//! they land in the snapshot's `failure` field and turn only that item's
//! outcome into an error. The fetcher holds no mutable state and is safe to
//! invoke from any number of workers concurrently.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use sd_core::{FetchError, HeaderSet, RequestKey, ResponseSnapshot, StatusPolicy};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors building a fetcher; these are fatal at startup
#[derive(Debug, Error)]
pub enum FetcherBuildError {
    #[error("invalid header name '{name}'")]
    InvalidHeaderName { name: String },

    #[error("invalid value for header '{name}'")]
    InvalidHeaderValue { name: String },
}

/// Stateless HTTP GET fetcher shared by all workers
///
/// One `reqwest::Client` (and thus one connection pool) backs every fetch in
/// the run. No request timeout is configured: a hanging fetch blocks only the
/// worker that issued it.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    headers: HeaderMap,
    policy: StatusPolicy,
}

impl Fetcher {
    /// Build a fetcher from the run's header set and status policy
    pub fn new(headers: &HeaderSet, policy: StatusPolicy) -> Result<Self, FetcherBuildError> {
        let mut header_map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers.iter() {
            let header_name =
                HeaderName::try_from(name).map_err(|_| FetcherBuildError::InvalidHeaderName {
                    name: name.to_string(),
                })?;
            let header_value =
                HeaderValue::try_from(value).map_err(|_| FetcherBuildError::InvalidHeaderValue {
                    name: name.to_string(),
                })?;
            header_map.insert(header_name, header_value);
        }

        Ok(Self {
            client: Client::new(),
            headers: header_map,
            policy,
        })
    }

    /// Fetch `scope + key`, buffering the whole body
    ///
    /// Always returns a snapshot; inspect `failure` for what went wrong.
    pub async fn fetch(&self, scope: &str, key: &RequestKey) -> ResponseSnapshot {
        let url = format!("{}{}", scope, key);
        debug!("URL: {}", url);

        let parsed = match Url::parse(&url) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("invalid URL '{}': {}", url, err);
                return ResponseSnapshot::failed(FetchError::InvalidRequest {
                    url,
                    reason: err.to_string(),
                });
            }
        };

        let response = match self
            .client
            .get(parsed)
            .headers(self.headers.clone())
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!("request to '{}' failed: {}", url, err);
                return ResponseSnapshot::failed(FetchError::Transport {
                    url,
                    reason: err.to_string(),
                });
            }
        };

        let status = response.status().as_u16();
        if self.policy == StatusPolicy::Strict && status != 200 {
            return ResponseSnapshot::failed(FetchError::UnexpectedStatus { status });
        }

        // Buffer the whole body; dropping the response either way releases
        // the connection back to the pool.
        match response.bytes().await {
            Ok(body) => ResponseSnapshot::received(status, body.to_vec()),
            Err(err) => {
                warn!("reading body from '{}' failed: {}", url, err);
                ResponseSnapshot::failed(FetchError::BodyRead {
                    url,
                    reason: err.to_string(),
                })
            }
        }
    }
}

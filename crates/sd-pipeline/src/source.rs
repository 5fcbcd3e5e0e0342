//! Item source: streams request keys from the input file
//!
//! Lines are `;`-separated records. After the configured skip prefix, a
//! record with more than one field survives only when its second field is
//! the literal `error` status marker; single-field records always survive.
//! The surviving first field is normalized into a request key.

use crate::error::SourceError;
use crate::PROGRESS_INTERVAL;
use sd_core::RequestKey;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Field delimiter within one input record
const FIELD_DELIMITER: char = ';';

/// Second-field value that keeps a multi-field record
const STATUS_ERROR_MARKER: &str = "error";

/// Token-name substitution applied verbatim to the surviving field
const TOKEN_NAME: &str = "access_token";
const TOKEN_REPLACEMENT: &str = "saya";

/// Parse one input record into a request key, or drop it
///
/// Normalization strips all quote characters, then replaces every
/// occurrence of the token name.
pub fn parse_record(line: &str) -> Option<RequestKey> {
    let mut fields = line.split(FIELD_DELIMITER);
    let first = fields.next().unwrap_or_default();
    if let Some(second) = fields.next() {
        if second != STATUS_ERROR_MARKER {
            return None;
        }
    }
    let normalized = first.replace('"', "").replace(TOKEN_NAME, TOKEN_REPLACEMENT);
    Some(RequestKey::new(normalized))
}

/// Read the input file and send each surviving key into the work channel
///
/// Skips the first `skip_lines` records unconditionally (even if the file
/// is shorter), logs a progress line every [`PROGRESS_INTERVAL`] records
/// read, and returns the number of keys yielded. A mid-stream read failure
/// is reported as [`SourceError::Read`] so the orchestrator can tell it
/// apart from clean end-of-input. The file handle closes when this task
/// returns.
pub(crate) async fn produce_keys(
    file: File,
    skip_lines: usize,
    work: mpsc::Sender<RequestKey>,
) -> Result<usize, SourceError> {
    let mut lines = BufReader::new(file).lines();
    let mut keys_yielded = 0;

    for _ in 0..skip_lines {
        match lines.next_line().await {
            Ok(Some(line)) => debug!("Skipping: {}", line),
            Ok(None) => break,
            Err(source) => {
                return Err(SourceError::Read {
                    keys_yielded,
                    source,
                })
            }
        }
    }

    let mut line_number: usize = 0;
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(source) => {
                return Err(SourceError::Read {
                    keys_yielded,
                    source,
                })
            }
        };
        if line_number % PROGRESS_INTERVAL == 0 {
            info!("Line: {}", line_number);
        }
        line_number += 1;

        let Some(key) = parse_record(&line) else {
            continue;
        };
        if work.send(key).await.is_err() {
            // Every worker is gone; nothing left to feed.
            warn!("work channel closed, stopping input after {} keys", keys_yielded);
            break;
        }
        keys_yielded += 1;
    }

    info!("Done {}", keys_yielded);
    Ok(keys_yielded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_single_field_record_always_kept() {
        assert_eq!(parse_record("abc123"), Some(RequestKey::new("abc123")));
    }

    #[test]
    fn test_multi_field_record_kept_only_on_error_marker() {
        assert_eq!(
            parse_record("abc123;error"),
            Some(RequestKey::new("abc123"))
        );
        assert_eq!(parse_record("abc123;ok"), None);
        assert_eq!(parse_record("abc123;error;extra"), Some(RequestKey::new("abc123")));
    }

    #[test]
    fn test_quotes_stripped() {
        assert_eq!(parse_record(r#""abc123""#), Some(RequestKey::new("abc123")));
    }

    #[test]
    fn test_token_name_substituted() {
        assert_eq!(
            parse_record(r#"/v1/thing?access_token=1"#),
            Some(RequestKey::new("/v1/thing?saya=1"))
        );
    }

    #[test]
    fn test_quotes_stripped_before_substitution() {
        assert_eq!(
            parse_record(r#"/v1/access"_token=1"#),
            Some(RequestKey::new("/v1/saya=1"))
        );
    }

    #[test]
    fn test_empty_line_yields_empty_key() {
        assert_eq!(parse_record(""), Some(RequestKey::new("")));
    }

    async fn keys_from(content: &str, skip_lines: usize) -> Vec<RequestKey> {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        input.write_all(content.as_bytes()).unwrap();
        let file = File::open(input.path()).await.unwrap();

        let (tx, mut rx) = mpsc::channel(64);
        let yielded = produce_keys(file, skip_lines, tx).await.unwrap();

        let mut keys = Vec::new();
        while let Some(key) = rx.recv().await {
            keys.push(key);
        }
        assert_eq!(keys.len(), yielded);
        keys
    }

    #[tokio::test]
    async fn test_skip_and_filter() {
        let keys = keys_from("header\n/a\n/b;ok\n/c;error\n", 1).await;
        assert_eq!(keys, vec![RequestKey::new("/a"), RequestKey::new("/c")]);
    }

    #[tokio::test]
    async fn test_skip_longer_than_file_yields_nothing() {
        let keys = keys_from("/a\n/b\n", 10).await;
        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_reports_keys_already_yielded() {
        // An invalid UTF-8 line surfaces from `lines()` as a read error;
        // the key before it was already yielded and stays valid work.
        let mut input = tempfile::NamedTempFile::new().unwrap();
        input.write_all(b"/a\n\xff\xfe\n/b\n").unwrap();
        let file = File::open(input.path()).await.unwrap();

        let (tx, mut rx) = mpsc::channel(64);
        let result = produce_keys(file, 0, tx).await;

        match result {
            Err(SourceError::Read { keys_yielded, .. }) => assert_eq!(keys_yielded, 1),
            other => panic!("expected a read error, got {:?}", other),
        }
        assert_eq!(rx.recv().await, Some(RequestKey::new("/a")));
        assert_eq!(rx.recv().await, None);
    }
}

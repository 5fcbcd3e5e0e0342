//! Pairwise verdict walk over one key's per-scope snapshots

use crate::{is_anagram, json_equal};
use sd_core::{OutcomeRecord, RequestKey, ResponseSnapshot};

/// Compare per-scope snapshots pairwise in index order and produce the key's
/// outcome record
///
/// Walks `(0,1), (1,2), ...` and stops at the first disagreement:
/// 1. either snapshot carries a fetch failure → ERROR with its message;
/// 2. status codes differ → ERROR `StatusCodes X!=Y`;
/// 3. body lengths differ → ERROR `invalid length`;
/// 4. bodies not JSON-equal → `Anagram!` when the bodies are character
///    permutations of each other, else `Different!`, with any comparison
///    machinery error appended.
///
/// If every pair agrees the outcome is OK. With fewer than two snapshots
/// there is nothing to disagree, so the outcome is OK.
pub fn verdict(key: RequestKey, snapshots: &[ResponseSnapshot]) -> OutcomeRecord {
    for pair in snapshots.windows(2) {
        let (left, right) = (&pair[0], &pair[1]);

        if let Some(failure) = &left.failure {
            return OutcomeRecord::error(key, failure.to_string());
        }
        if let Some(failure) = &right.failure {
            return OutcomeRecord::error(key, failure.to_string());
        }

        if left.status != right.status {
            let message = format!(
                "StatusCodes {}!={}",
                status_text(left),
                status_text(right)
            );
            return OutcomeRecord::error(key, message);
        }

        if left.body.len() != right.body.len() {
            return OutcomeRecord::error(key, "invalid length");
        }

        let (equal, parse_error) = match json_equal(&left.body, &right.body) {
            Ok(equal) => (equal, None),
            Err(err) => (false, Some(err.to_string())),
        };
        if !equal {
            let left_text = String::from_utf8_lossy(&left.body);
            let right_text = String::from_utf8_lossy(&right.body);
            let mut message = if is_anagram(&left_text, &right_text) {
                "Anagram!".to_string()
            } else {
                "Different!".to_string()
            };
            if let Some(err) = parse_error {
                message.push_str(" Err:");
                message.push_str(&err);
            }
            return OutcomeRecord::error(key, message);
        }
    }

    OutcomeRecord::ok(key)
}

fn status_text(snapshot: &ResponseSnapshot) -> String {
    match snapshot.status {
        Some(status) => status.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::{FetchError, OutcomeKind};

    fn key() -> RequestKey {
        RequestKey::new("abc123")
    }

    fn received(status: u16, body: &[u8]) -> ResponseSnapshot {
        ResponseSnapshot::received(status, body.to_vec())
    }

    #[test]
    fn test_identical_bytes_are_ok() {
        let snapshots = [received(200, br#"{"a":1}"#), received(200, br#"{"a":1}"#)];
        let record = verdict(key(), &snapshots);
        assert_eq!(record.kind, OutcomeKind::Ok);
        assert_eq!(record.key, key());
    }

    #[test]
    fn test_reordered_object_keys_are_ok() {
        let snapshots = [
            received(200, br#"{"a":1,"b":2}"#),
            received(200, br#"{"b":2,"a":1}"#),
        ];
        assert_eq!(verdict(key(), &snapshots).kind, OutcomeKind::Ok);
    }

    #[test]
    fn test_fetch_failure_reported_with_its_message() {
        let snapshots = [
            ResponseSnapshot::failed(FetchError::Transport {
                url: "http://a/abc123".to_string(),
                reason: "connection refused".to_string(),
            }),
            received(200, br#"{"a":1}"#),
        ];
        let record = verdict(key(), &snapshots);
        assert_eq!(record.kind, OutcomeKind::Error);
        assert!(record.message.contains("connection refused"));
    }

    #[test]
    fn test_status_mismatch_names_both_codes() {
        let snapshots = [received(200, br#"{}"#), received(404, br#"{}"#)];
        let record = verdict(key(), &snapshots);
        assert_eq!(record.kind, OutcomeKind::Error);
        assert_eq!(record.message, "StatusCodes 200!=404");
    }

    #[test]
    fn test_length_mismatch() {
        let snapshots = [received(200, br#"{"a":1}"#), received(200, br#"{"a":12}"#)];
        let record = verdict(key(), &snapshots);
        assert_eq!(record.message, "invalid length");
    }

    #[test]
    fn test_different_values_same_length() {
        let snapshots = [received(200, br#"{"a":1}"#), received(200, br#"{"a":2}"#)];
        let record = verdict(key(), &snapshots);
        assert_eq!(record.kind, OutcomeKind::Error);
        assert_eq!(record.message, "Different!");
    }

    #[test]
    fn test_non_json_permutation_is_an_anagram() {
        // Same characters, different order, neither parses as JSON.
        let snapshots = [received(200, b"ab:cd"), received(200, b"dc:ba")];
        let record = verdict(key(), &snapshots);
        assert_eq!(record.kind, OutcomeKind::Error);
        assert!(record.message.starts_with("Anagram!"));
        assert!(record.message.contains("Err:"));
    }

    #[test]
    fn test_single_scope_is_ok() {
        let snapshots = [received(200, br#"{"a":1}"#)];
        assert_eq!(verdict(key(), &snapshots).kind, OutcomeKind::Ok);
    }

    #[test]
    fn test_stops_at_first_disagreeing_pair() {
        // Pair (0,1) disagrees on status; the bad third snapshot is never
        // reached.
        let snapshots = [
            received(200, br#"{}"#),
            received(500, br#"{}"#),
            ResponseSnapshot::failed(FetchError::Transport {
                url: "http://c/abc123".to_string(),
                reason: "boom".to_string(),
            }),
        ];
        let record = verdict(key(), &snapshots);
        assert_eq!(record.message, "StatusCodes 200!=500");
    }

    #[test]
    fn test_three_agreeing_scopes_are_ok() {
        let snapshots = [
            received(200, br#"{"a":1}"#),
            received(200, br#"{"a":1}"#),
            received(200, br#"{"a":1}"#),
        ];
        assert_eq!(verdict(key(), &snapshots).kind, OutcomeKind::Ok);
    }
}

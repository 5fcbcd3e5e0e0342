//! Semantic JSON equality over raw byte bodies

use serde_json::Value;

/// Compare two byte bodies as JSON values
///
/// Returns `Ok(true)` iff both parse and the parsed values are structurally
/// equal: objects by key set and per-key value (key order ignored), arrays
/// element-wise in order, primitives by value. A parse failure on either
/// side is a comparison-machinery error, not a judgment on the bodies.
pub fn json_equal(a: &[u8], b: &[u8]) -> Result<bool, serde_json::Error> {
    let value_a: Value = serde_json::from_slice(a)?;
    let value_b: Value = serde_json::from_slice(b)?;
    Ok(value_a == value_b)
}

//! RequestKey type identifying one unit of comparison work

use std::fmt;

/// The normalized identifier/path suffix fetched from every scope for one
/// comparison.
///
/// A RequestKey is opaque beyond string concatenation with a scope's base-URL
/// prefix. It is produced once by the item source and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey(String);

impl RequestKey {
    /// Create a new RequestKey from an already-normalized string
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RequestKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

//! ScopeSet: the ordered list of API deployments under comparison

use thiserror::Error;

/// Error type for invalid scope sets
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScopeSetError {
    #[error("at least one scope is required")]
    Empty,

    #[error("scope {index} is an empty string")]
    EmptyScope { index: usize },
}

/// An ordered sequence of base-URL prefixes, one per API deployment
///
/// The order is significant: the worker pool compares scope results pairwise
/// by index, `(0,1), (1,2), ...`. The set is fixed for the whole run and
/// shared read-only by all workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSet {
    scopes: Vec<String>,
}

impl ScopeSet {
    /// Create a ScopeSet, validating that it is non-empty and has no blank
    /// entries
    pub fn new(scopes: Vec<String>) -> Result<Self, ScopeSetError> {
        if scopes.is_empty() {
            return Err(ScopeSetError::Empty);
        }
        for (index, scope) in scopes.iter().enumerate() {
            if scope.is_empty() {
                return Err(ScopeSetError::EmptyScope { index });
            }
        }
        Ok(Self { scopes })
    }

    /// Number of scopes
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Always false: construction rejects empty sets
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the base-URL prefixes in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    /// The base-URL prefix at the given index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.scopes.get(index).map(String::as_str)
    }
}

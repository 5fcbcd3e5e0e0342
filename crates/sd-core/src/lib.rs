//! Core types for scopediff
//!
//! This crate provides the fundamental types shared across the comparison
//! pipeline: RequestKey, ScopeSet, HeaderSet, ResponseSnapshot, OutcomeRecord,
//! and the fetch error/policy types.

mod headers;
mod key;
mod outcome;
mod scope;
mod snapshot;

pub use headers::{HeaderSet, AUTH_HEADER};
pub use key::RequestKey;
pub use outcome::{OutcomeKind, OutcomeRecord};
pub use scope::{ScopeSet, ScopeSetError};
pub use snapshot::{FetchError, ResponseSnapshot, StatusPolicy};

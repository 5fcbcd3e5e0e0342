//! Response comparison for scopediff
//!
//! Pure functions only, no I/O: semantic JSON equality, the anagram fallback
//! classification, and the pairwise verdict walk a worker runs over its
//! per-scope snapshots.

mod anagram;
mod json;
mod verdict;

pub use anagram::is_anagram;
pub use json::json_equal;
pub use verdict::verdict;

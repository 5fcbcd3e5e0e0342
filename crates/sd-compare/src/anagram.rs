//! Anagram check used as a soft mismatch classification

use std::collections::HashMap;

/// True iff the two strings contain exactly the same multiset of characters
///
/// Used to classify bodies that are not JSON-equal: same characters in a
/// different arrangement reads as "Anagram!" rather than an arbitrary
/// content mismatch.
pub fn is_anagram(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut counts: HashMap<char, i64> = HashMap::new();
    for ch in a.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }
    for ch in b.chars() {
        match counts.get_mut(&ch) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    counts.remove(&ch);
                }
            }
            None => return false,
        }
    }
    counts.is_empty()
}

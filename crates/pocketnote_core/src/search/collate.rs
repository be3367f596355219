//! Label collation.

use std::cmp::Ordering;

/// Case-aware lexicographic order: case-insensitive first, then
/// case-sensitive so `Alpha` precedes `alpha`.
pub fn compare_labels(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

//! Total-order comparators used by sort keys.

use std::cmp::Ordering;

pub fn ascending<K: Ord>(a: K, b: K) -> Ordering {
    a.cmp(&b)
}

/// Largest first.
pub fn descending<K: Ord>(a: K, b: K) -> Ordering {
    b.cmp(&a)
}

pub fn ascending_f64(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

pub fn descending_f64(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Largest first, missing values last.
pub fn descending_opt_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => descending_f64(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive lexicographic order.
pub fn alphabetical(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

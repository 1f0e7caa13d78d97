//! Fuzzy ranking of name projections against a search string.
//!
//! Scores come from `rust_fuzzy_search::fuzzy_compare(search, key)`: the
//! share of the search's padded trigrams found in the key. Matching is case
//! sensitive and not symmetric.

use crate::dto::names::Searchable;
use ordered_float::NotNan;
use rust_fuzzy_search::fuzzy_compare;
use std::cmp::Reverse;

/// Similarity of `key` to `search` in `[0, 1]`.
pub fn score(search: &str, key: &str) -> Option<NotNan<f32>> {
    NotNan::new(fuzzy_compare(search, key)).ok()
}

/// Whether `search` should be compared against product codes.
pub fn is_numeric_query(search: &str) -> bool {
    search.trim().parse::<f64>().is_ok()
}

/// Orders `names` by descending score against `search`. Equal scores keep
/// their input order.
pub fn rank<N: Searchable>(mut names: Vec<N>, search: &str) -> Vec<N> {
    let numeric = is_numeric_query(search);
    names.sort_by_cached_key(|n| Reverse(score(search, n.search_key(numeric))));
    names
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered-slice set arithmetic used by the diff planner.

use std::collections::HashSet;
use std::hash::Hash;

/// `slice1 - slice2`, preserving the order of `slice1`. Elements of `slice2`
/// absent from `slice1` are ignored.
pub fn subtract_ordered<T: Eq + Hash + Clone>(slice1: &[T], slice2: &[T]) -> Vec<T> {
    let exclude: HashSet<&T> = slice2.iter().collect();
    slice1
        .iter()
        .filter(|v| !exclude.contains(v))
        .cloned()
        .collect()
}

/// Concatenation of any number of ordered slices, duplicates preserved.
/// Used by the progress writer: planning guarantees the inputs are disjoint
/// from `done ∪ failed`, so no dedup is needed here.
pub fn concat_ordered<T: Clone>(slices: &[&[T]]) -> Vec<T> {
    slices.iter().flat_map(|s| s.iter().cloned()).collect()
}

#[cfg(test)]
#[path = "sets_tests.rs"]
mod tests;

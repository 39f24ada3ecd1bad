// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property tests for the ordered-set arithmetic the diff planner builds on.

use crate::sets::subtract_ordered;
use proptest::collection::vec;
use proptest::prelude::*;

proptest! {
    /// Subtracting never introduces an element that wasn't already present.
    #[test]
    fn subtract_never_grows_the_set(a in vec(0u32..50, 0..20), b in vec(0u32..50, 0..20)) {
        let result = subtract_ordered(&a, &b);
        prop_assert!(result.iter().all(|v| a.contains(v)));
        prop_assert!(result.len() <= a.len());
    }

    /// Nothing subtracted out of `a` by `b` remains in the result.
    #[test]
    fn subtract_removes_everything_in_b(a in vec(0u32..50, 0..20), b in vec(0u32..50, 0..20)) {
        let result = subtract_ordered(&a, &b);
        prop_assert!(result.iter().all(|v| !b.contains(v)));
    }

    /// Order of the first operand is preserved (a stable filter).
    #[test]
    fn subtract_preserves_relative_order(a in vec(0u32..50, 0..20), b in vec(0u32..50, 0..20)) {
        let result = subtract_ordered(&a, &b);
        let positions: Vec<usize> = result
            .iter()
            .map(|v| a.iter().position(|x| x == v).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }

    /// Subtracting an empty set is the identity.
    #[test]
    fn subtract_empty_is_identity(a in vec(0u32..50, 0..20)) {
        let empty: Vec<u32> = Vec::new();
        prop_assert_eq!(subtract_ordered(&a, &empty), a);
    }
}

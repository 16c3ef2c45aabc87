//! Property-based tests for pipeline laws.
//!
//! ## Filter Laws
//! - **Partition**: `keep(p)` and `exclude(p)` split the input into two
//!   order-preserving subsequences covering every element
//!
//! ## Terminal Laws
//! - **Drain**: `p!(x, drain(), materialize()) == Ok(vec![])`
//! - **Materialize**: `p!(x, materialize()) == Ok(x)`
//!
//! ## Dedupe Laws
//! - **Idempotence**: deduping twice by the same key equals deduping once
//! - **First occurrence**: the output keeps the first element of each key
//!
//! ## Composer Laws
//! - **Identity**: `p!(x) == Ok(x)`
//! - **Sequencing**: `p!(x, f, g) == p!(p!(x, f)?, g)`
//!
//! ## Aggregate Laws
//! - **Seeded fold**: `aggregate_from(seed, f)` equals `Iterator::fold`

use lazypipe::compose::{Entry, compose};
use lazypipe::prelude::*;
use proptest::prelude::*;

fn small_vec() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50..50_i32, 0..64)
}

// =============================================================================
// Filter Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_keep_and_exclude_partition_the_input(values in small_vec(), divisor in 1..7_i32) {
        let predicate = move |value: &i32| value % divisor == 0;

        let kept = p!(values.clone(), keep(predicate), materialize()).unwrap();
        let excluded = p!(values.clone(), exclude(predicate), materialize()).unwrap();

        let expected_kept: Vec<i32> = values.iter().copied().filter(predicate).collect();
        let expected_excluded: Vec<i32> =
            values.iter().copied().filter(|value| !predicate(value)).collect();

        prop_assert_eq!(kept.len() + excluded.len(), values.len());
        prop_assert_eq!(kept, expected_kept);
        prop_assert_eq!(excluded, expected_excluded);
    }

    #[test]
    fn prop_exclude_none_keeps_present_values_in_order(values in prop::collection::vec(any::<Option<u8>>(), 0..64)) {
        let present = p!(values.clone(), exclude_none(), materialize()).unwrap();
        let expected: Vec<u8> = values.into_iter().flatten().collect();
        prop_assert_eq!(present, expected);
    }
}

// =============================================================================
// Terminal Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_drain_then_materialize_is_empty(values in small_vec()) {
        let result = p!(values, drain(), materialize()).unwrap();
        prop_assert!(result.is_empty());
    }

    #[test]
    fn prop_materialize_preserves_order(values in small_vec()) {
        let result = p!(values.clone(), materialize()).unwrap();
        prop_assert_eq!(result, values);
    }
}

// =============================================================================
// Dedupe Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_unique_by_is_idempotent(values in small_vec(), modulus in 1..10_i32) {
        let key = move |value: &i32| value.rem_euclid(modulus);

        let once = p!(values.clone(), unique_by(key), materialize()).unwrap();
        let twice = p!(values, unique_by(key), unique_by(key), materialize()).unwrap();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_unique_keeps_first_occurrence(values in small_vec()) {
        let deduped = p!(values.clone(), unique(), materialize()).unwrap();

        let mut expected = Vec::new();
        for value in values {
            if !expected.contains(&value) {
                expected.push(value);
            }
        }
        prop_assert_eq!(deduped, expected);
    }

    #[test]
    fn prop_dedupe_stages_do_not_share_state(left in small_vec(), right in small_vec()) {
        let make_stage = || unique_by(|value: &i32| *value);

        let mut first = p!(left.clone(), make_stage()).unwrap();
        let mut second = p!(right.clone(), make_stage()).unwrap();

        let mut first_output = Vec::new();
        let mut second_output = Vec::new();
        loop {
            let a = first.next();
            let b = second.next();
            if a.is_none() && b.is_none() {
                break;
            }
            first_output.extend(a.map(Result::unwrap));
            second_output.extend(b.map(Result::unwrap));
        }

        prop_assert_eq!(first_output, p!(left, unique(), materialize()).unwrap());
        prop_assert_eq!(second_output, p!(right, unique(), materialize()).unwrap());
    }
}

// =============================================================================
// Composer Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_p_identity(value in any::<i64>()) {
        prop_assert_eq!(p!(value).unwrap(), value);
    }

    #[test]
    fn prop_p_sequencing(values in small_vec()) {
        let double = || apply(|value: i32| value.wrapping_mul(2));
        let odd = || keep(|value: &i32| value % 2 != 0);

        let combined = p!(values.clone(), double(), odd(), materialize()).unwrap();
        let split = p!(p!(values, double()).unwrap(), odd(), materialize()).unwrap();

        prop_assert_eq!(combined, split);
    }

    #[test]
    fn prop_compose_agrees_with_p(values in small_vec(), offset in -10..10_i32) {
        let by_macro = p!(
            values.clone(),
            apply(move |value: i32| value + offset),
            exclude(|value: &i32| *value < 0),
            materialize(),
        )
        .unwrap();

        let entries = vec![
            Entry::source(seq(values).boxed()),
            Entry::erased(apply(move |value: i32| value + offset)),
            Entry::erased(exclude(|value: &i32| *value < 0)),
        ];
        let by_compose = compose(entries)
            .and_then(|sequence| materialize().apply(sequence))
            .unwrap();

        prop_assert_eq!(by_macro, by_compose);
    }
}

// =============================================================================
// Aggregate Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_aggregate_from_matches_fold(values in small_vec(), seed in any::<i32>()) {
        let folded = values.iter().fold(seed, |acc, value| acc.wrapping_sub(*value));
        let aggregated = p!(
            values,
            aggregate_from(seed, |acc: i32, value: i32| acc.wrapping_sub(value)),
        )
        .unwrap();
        prop_assert_eq!(aggregated, folded);
    }

    #[test]
    fn prop_aggregate_without_seed_uses_first_element(values in prop::collection::vec(any::<i32>(), 1..64)) {
        let expected = values.iter().copied().reduce(i32::wrapping_add);
        let aggregated = p!(values, aggregate(i32::wrapping_add)).unwrap();
        prop_assert_eq!(Some(aggregated), expected);
    }
}

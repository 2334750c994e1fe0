//! Property-based tests for the matching engine.
//!
//! Generated values check the invariants that hold for every input:
//! 1. Literals match themselves (SameValue), zeros excepted across sign
//! 2. Array patterns bind by position and require exact length without rest
//! 3. A trailing rest collects exactly the unmatched suffix
//! 4. Sharing a cache, iterator positions are pulled at most once

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use tessera_match::{
    identifier, match_pattern, ArrayPattern, Bindings, Cache, Key, Literal, ObjectPattern, Pattern,
    Value,
};
use tessera_value::ObjectBuilder;

// -- Strategies --

fn primitive_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>().prop_map(Value::number),
        any::<i64>().prop_map(|n| Value::bigint(i128::from(n))),
        "[a-z0-9 ]{0,12}".prop_map(Value::string),
    ]
}

fn numbers_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-1000..1000i32, 0..12)
}

fn run(pattern: &Pattern, matchable: &Value) -> Option<Bindings> {
    let mut cache = Cache::new();
    match_pattern(pattern, matchable, &mut cache).unwrap()
}

fn array_of(numbers: &[i32]) -> Value {
    Value::array(numbers.iter().copied().map(Value::from).collect())
}

fn identifiers(len: usize) -> ArrayPattern {
    (0..len).map(|_| identifier()).collect()
}

proptest! {
    #[test]
    fn literal_matches_itself(value in primitive_strategy()) {
        let pattern = Pattern::from(Literal::new(value.clone()).unwrap());
        prop_assert_eq!(run(&pattern, &value), Some(Bindings::new()));
    }

    #[test]
    fn literal_mismatch_is_none(a in any::<i32>(), b in any::<i32>()) {
        prop_assume!(a != b);
        prop_assert_eq!(run(&Pattern::from(a), &Value::from(b)), None);
    }

    #[test]
    fn identifiers_bind_every_index(numbers in numbers_strategy()) {
        let result = run(&identifiers(numbers.len()).into(), &array_of(&numbers)).unwrap();
        prop_assert_eq!(result.len(), numbers.len());
        for (index, n) in numbers.iter().enumerate() {
            prop_assert_eq!(result.get(Key::index(index).as_str()), Some(&Value::from(*n)));
        }
    }

    #[test]
    fn length_must_match_without_rest(numbers in numbers_strategy(), extra in 1..4usize) {
        let value = array_of(&numbers);
        let longer = identifiers(numbers.len() + extra);
        prop_assert_eq!(run(&longer.into(), &value), None);
        if !numbers.is_empty() {
            let shorter = identifiers(numbers.len() - 1);
            prop_assert_eq!(run(&shorter.into(), &value), None);
        }
    }

    #[test]
    fn rest_collects_the_suffix(numbers in numbers_strategy(), split in 0..12usize) {
        let split = split.min(numbers.len());
        let pattern = identifiers(split).rest("tail");
        let result = run(&pattern.into(), &array_of(&numbers)).unwrap();
        let tail = result.get("tail").unwrap();
        let expected: Vec<Value> = numbers[split..].iter().copied().map(Value::from).collect();
        prop_assert_eq!(tail.as_array(), Some(expected.as_slice()));
    }

    #[test]
    fn positions_are_pulled_at_most_once(
        len in 0..8i32,
        lengths in prop::collection::vec((0..10usize, any::<bool>()), 1..6),
    ) {
        let pulls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulls);
        let generator = Value::generator((0..len).map(move |i| {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::from(i)
        }));
        let mut cache = Cache::new();

        for (arity, with_rest) in lengths {
            let pattern = if with_rest {
                identifiers(arity).rest("")
            } else {
                identifiers(arity)
            };
            match_pattern(&pattern.into(), &generator, &mut cache).unwrap();
        }

        prop_assert!(pulls.load(Ordering::SeqCst) <= usize::try_from(len).unwrap());
    }

    #[test]
    fn empty_object_pattern_matches_any_object(keys in prop::collection::vec("[a-z]{1,4}", 0..6)) {
        let object = keys
            .iter()
            .fold(ObjectBuilder::new(), |b, k| b.field(k.as_str(), 1))
            .build();
        prop_assert_eq!(run(&ObjectPattern::new().into(), &object), Some(Bindings::new()));
    }

    #[test]
    fn object_rest_partitions_own_keys(
        keys in prop::collection::btree_set("[a-z]{1,3}", 0..8),
        picks in prop::collection::vec(any::<bool>(), 8),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let object = keys
            .iter()
            .fold(ObjectBuilder::new(), |b, k| b.field(k.as_str(), k.as_str()))
            .build();
        let picked: Vec<&String> = keys.iter().zip(&picks).filter(|(_, p)| **p).map(|(k, _)| k).collect();
        let pattern = picked
            .iter()
            .fold(ObjectPattern::new(), |p, k| p.entry(k.as_str(), identifier()))
            .rest("others");

        let result = run(&pattern.into(), &object).unwrap();

        let others: Vec<String> = result
            .get("others")
            .unwrap()
            .own_enumerable_entries()
            .into_iter()
            .map(|(k, _)| k.as_str().to_string())
            .collect();
        let expected: Vec<String> = keys.iter().filter(|k| !picked.contains(k)).cloned().collect();
        prop_assert_eq!(others, expected);
        for key in picked {
            prop_assert_eq!(result.get(key), Some(&Value::string(key)));
        }
    }

    #[test]
    fn object_pattern_rejects_every_primitive(value in primitive_strategy()) {
        prop_assert_eq!(run(&ObjectPattern::new().into(), &value), None);
    }
}

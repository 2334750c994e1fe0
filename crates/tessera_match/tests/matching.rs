//! End-to-end tests through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tessera_match::{
    capture, identifier, init_tracing, instance_of, match_array, match_literal, match_object,
    match_pattern, match_value, ArrayPattern, Bindings, Cache, Literal, MatchResult,
    ObjectPattern, Pattern, Regex, Value,
};
use tessera_value::{IterStep, IteratorValue, ObjectBuilder};

fn bindings<const N: usize>(entries: [(&str, Value); N]) -> Bindings {
    entries.into_iter().collect()
}

#[test]
fn literals_follow_same_value() {
    let nan = Literal::new(Value::number(f64::NAN)).unwrap();
    let pos = Literal::new(Value::number(0.0)).unwrap();
    let neg = Literal::new(Value::number(-0.0)).unwrap();

    assert_eq!(match_literal(&nan, &Value::number(f64::NAN)), Some(Bindings::new()));
    assert_eq!(match_literal(&pos, &Value::number(-0.0)), None);
    assert_eq!(match_literal(&neg, &Value::number(0.0)), None);
}

#[test]
fn regex_groups_become_string_bindings() {
    init_tracing();
    let pattern = Pattern::from(Regex::new(r"^(?<user>\w+)@(?<host>[\w.]+)$").unwrap());
    let mut cache = Cache::new();

    assert_eq!(
        match_pattern(&pattern, &Value::string("ada@example.org"), &mut cache).unwrap(),
        Some(bindings([
            ("user", Value::string("ada")),
            ("host", Value::string("example.org")),
        ]))
    );
}

#[test]
fn empty_object_pattern_registers_matchable() {
    let object = ObjectBuilder::new().field("anything", 1).build();
    let mut cache = Cache::new();

    assert_eq!(
        match_object(&ObjectPattern::new(), &object, &mut cache).unwrap(),
        Some(Bindings::new())
    );
    assert!(cache.contains(&object));
}

#[test]
fn object_mismatch_records_the_read_value() {
    let object = ObjectBuilder::new().field("a", 1).build();
    let mut cache = Cache::new();

    let result = match_object(&ObjectPattern::new().entry("a", 0), &object, &mut cache).unwrap();

    assert_eq!(result, None);
    assert_eq!(cache.cached_property(&object, "a"), Some(&Value::from(1)));
}

#[test]
fn nested_binding_overwrites_outer_one() {
    let object = ObjectBuilder::new()
        .field("a", 0)
        .field("b", ObjectBuilder::new().field("a", 1).build())
        .build();
    let pattern: Pattern = ObjectPattern::new()
        .entry("a", identifier())
        .entry("b", ObjectPattern::new().entry("a", identifier()))
        .into();
    let mut cache = Cache::new();

    assert_eq!(
        match_pattern(&pattern, &object, &mut cache).unwrap(),
        Some(bindings([("a", Value::from(1))]))
    );
}

#[test]
fn generator_tail_is_bound_and_one_step_cached() {
    let generator = Value::generator((0..3).map(Value::from));
    let iterator = generator.as_iterator().cloned().unwrap();
    let mut cache = Cache::new();

    let result = match_array(
        &ArrayPattern::new().element(0).rest("tail"),
        &iterator,
        &mut cache,
    )
    .unwrap()
    .unwrap();

    assert_eq!(
        result.get("tail").and_then(Value::as_array),
        Some(&[Value::from(1), Value::from(2)][..])
    );
    assert_eq!(
        cache.cached_steps(&iterator),
        Some(&[IterStep::Yielded(Value::from(0))][..])
    );
}

#[test]
fn generator_without_rest_needs_exact_length() {
    let generator = Value::generator((0..3).map(Value::from));
    let mut cache = Cache::new();

    let pattern: Pattern = ArrayPattern::new().element(0).into();
    assert_eq!(match_pattern(&pattern, &generator, &mut cache).unwrap(), None);
}

#[test]
fn arms_pull_each_position_once() {
    let pulls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulls);
    let generator = Value::generator((0..2).map(move |i| {
        counter.fetch_add(1, Ordering::SeqCst);
        Value::from(i)
    }));

    let matched = match_value(generator)
        .when(ArrayPattern::new().element(identifier()), |_| "single")
        .when(ArrayPattern::new().element(0).element(1), |_| "pair")
        .finish()
        .unwrap();

    assert_eq!(matched, "pair");
    assert_eq!(pulls.load(Ordering::SeqCst), 2);
}

#[test]
fn shape_based_dispatch() {
    let describe = |value: Value| {
        match_value(value)
            .when(Pattern::null(), |_| "null".to_string())
            .when(Regex::new(r"^\d+$").unwrap(), |_| "digits".to_string())
            .when(
                ArrayPattern::new().element(capture("head")).rest(""),
                |b| format!("list starting with {}", b.get("head").unwrap()),
            )
            .when(
                ObjectPattern::new().entry("type", "user").entry("name", capture("name")),
                |b| format!("user {}", b.get("name").unwrap()),
            )
            .when(instance_of("Error"), |_| "error".to_string())
            .otherwise(|v| format!("other {}", v.type_name()))
            .unwrap()
    };

    let user = ObjectBuilder::new()
        .field("type", "user")
        .field("name", "ada")
        .build();
    let error = ObjectBuilder::new().class("Error").field("message", "x").build();

    assert_eq!(describe(Value::Null), "null");
    assert_eq!(describe(Value::from(42)), "digits");
    assert_eq!(describe(Value::string("abc")), "list starting with a");
    assert_eq!(describe(user), "user ada");
    assert_eq!(describe(error), "error");
    assert_eq!(describe(Value::Bool(true)), "other boolean");
}

#[test]
fn close_hook_runs_after_match() {
    let closed = Arc::new(AtomicUsize::new(0));
    let hook = Arc::clone(&closed);
    let generator = Value::iterator(
        IteratorValue::generator((0..5).map(Value::from)).with_close_hook(move || {
            hook.fetch_add(1, Ordering::SeqCst);
        }),
    );

    let first = match_value(generator)
        .when(ArrayPattern::new().element(capture("first")).rest(""), |b| {
            b.get("first").cloned()
        })
        .finish()
        .unwrap();

    assert_eq!(first, Some(Value::from(0)));
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[test]
fn custom_matcher_payload_is_not_bound() {
    let positive = tessera_match::custom(|v| {
        Ok(match v.as_number() {
            Some(n) if n > 0.0 => MatchResult::Matched(Value::string("positive")),
            _ => MatchResult::Unmatched,
        })
    });
    let pattern: Pattern = ArrayPattern::new().element(positive).element(capture("x")).into();
    let mut cache = Cache::new();

    assert_eq!(
        match_pattern(
            &pattern,
            &Value::array(vec![Value::from(1), Value::from(2)]),
            &mut cache
        )
        .unwrap(),
        Some(bindings([("x", Value::from(2))]))
    );
}

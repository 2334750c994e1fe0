use super::*;

/// Toy nested structure standing in for a deeply nested pattern.
#[allow(dead_code)]
enum Nest {
    Leaf(u64),
    Wrap(Box<Nest>),
}

fn build(depth: u64) -> Nest {
    let mut node = Nest::Leaf(depth);
    for _ in 0..depth {
        node = Nest::Wrap(Box::new(node));
    }
    node
}

fn unwrap_depth(node: &Nest) -> u64 {
    ensure_sufficient_stack(|| match node {
        Nest::Leaf(_) => 0,
        Nest::Wrap(inner) => unwrap_depth(inner) + 1,
    })
}

fn drop_iteratively(mut node: Nest) {
    while let Nest::Wrap(inner) = node {
        node = *inner;
    }
}

#[test]
fn shallow_nesting_is_walked() {
    let nest = build(10);
    assert_eq!(unwrap_depth(&nest), 10);
    drop_iteratively(nest);
}

#[test]
fn deep_nesting_does_not_overflow() {
    let nest = build(100_000);
    assert_eq!(unwrap_depth(&nest), 100_000);
    drop_iteratively(nest);
}

#[test]
fn returns_closure_result() {
    let result: Result<Option<u8>, &str> = ensure_sufficient_stack(|| Ok(Some(7)));
    assert_eq!(result, Ok(Some(7)));
}

use super::*;
use crate::MatchErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn capture_names() {
    assert!(matches!(capture("x"), Pattern::Identifier(Some(k)) if k.as_str() == "x"));
    assert!(matches!(capture(""), Pattern::Identifier(None)));
    assert!(matches!(capture("...xs"), Pattern::Rest(Some(k)) if k.as_str() == "xs"));
    assert!(matches!(capture("..."), Pattern::Rest(None)));
}

#[test]
fn kinds() {
    let table: Vec<(Pattern, PatternKind)> = vec![
        (Pattern::from(1), PatternKind::Literal),
        (Pattern::null(), PatternKind::Literal),
        (Pattern::from(Regex::new("a").unwrap()), PatternKind::Regex),
        (identifier(), PatternKind::Identifier),
        (rest(), PatternKind::Rest),
        (ObjectPattern::new().into(), PatternKind::Object),
        (ArrayPattern::new().into(), PatternKind::Array),
        (
            custom(|_| Ok(MatchResult::Unmatched)),
            PatternKind::Custom,
        ),
    ];
    for (pattern, kind) in table {
        assert_eq!(pattern.kind(), kind, "{pattern:?}");
    }
}

#[test]
fn custom_precedes_every_other_kind() {
    assert!(PatternKind::Custom < PatternKind::Identifier);
    assert!(PatternKind::Regex < PatternKind::Array);
    assert!(PatternKind::Array < PatternKind::Object);
    assert!(PatternKind::Object < PatternKind::Literal);
}

#[test]
fn literals_reject_reference_values() {
    assert!(Literal::new(Value::from(1)).is_some());
    assert!(Literal::new(Value::string("s")).is_some());
    assert!(Literal::new(Value::object()).is_none());
    assert!(Literal::new(Value::array(vec![])).is_none());
}

#[test]
fn object_entries_replace_in_place() {
    let pattern = ObjectPattern::new()
        .entry("a", 1)
        .entry("b", 2)
        .entry("a", 3);
    let keys: Vec<&str> = pattern.entries().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(pattern.keys(), vec![Key::new("a"), Key::new("b")]);
    assert!(matches!(
        &pattern.entries()[0].1,
        Pattern::Literal(lit) if *lit.value() == Value::from(3)
    ));
}

#[test]
fn object_rest_marker() {
    let unnamed = ObjectPattern::new().rest("");
    assert_eq!(unnamed.rest_marker(), Some(&RestMarker { name: None }));

    let named = ObjectPattern::new().rest("others");
    assert_eq!(
        named.rest_marker(),
        Some(&RestMarker {
            name: Some(Key::new("others"))
        })
    );
    assert_eq!(ObjectPattern::new().rest_marker(), None);
}

#[test]
fn split_rest_detects_trailing_marker() {
    let with_rest = ArrayPattern::new().element(1).rest("tail");
    let (body, tail) = with_rest.split_rest();
    assert_eq!(body.len(), 1);
    assert_eq!(tail, Some(Some(&Key::new("tail"))));

    let unnamed = ArrayPattern::new().element(1).rest("");
    assert_eq!(unnamed.split_rest().1, Some(None));

    let without = ArrayPattern::new().element(1).hole();
    let (body, tail) = without.split_rest();
    assert_eq!(body.len(), 2);
    assert_eq!(tail, None);
}

#[test]
fn leading_rest_is_not_a_tail() {
    let pattern = ArrayPattern::new().rest("xs").element(1);
    let (body, tail) = pattern.split_rest();
    assert_eq!(body.len(), 2);
    assert_eq!(tail, None);
}

#[test]
fn validate_accepts_well_formed_patterns() {
    let pattern: Pattern = ObjectPattern::new()
        .entry("xs", ArrayPattern::new().element(capture("x")).rest("rest"))
        .rest("others")
        .into();
    assert!(pattern.validate().is_ok());
    assert!(Pattern::from(1).validate().is_ok());
}

#[test]
fn validate_rejects_leading_rest() {
    let pattern: Pattern = ArrayPattern::new().rest("xs").element(1).into();
    let err = pattern.validate().unwrap_err();
    assert_eq!(
        err.kind,
        MatchErrorKind::MisplacedRest {
            container: "array",
            position: "at index 0".to_string(),
        }
    );
}

#[test]
fn validate_rejects_rest_as_object_value() {
    let pattern: Pattern = ObjectPattern::new().entry("a", capture("...a")).into();
    let err = pattern.validate().unwrap_err();
    assert_eq!(
        err.kind,
        MatchErrorKind::MisplacedRest {
            container: "object",
            position: "at key `a`".to_string(),
        }
    );
}

#[test]
fn validate_notes_the_path_to_nested_errors() {
    let inner = ArrayPattern::new().rest("").element(1);
    let pattern: Pattern = ObjectPattern::new().entry("list", inner).into();
    let err = pattern.validate().unwrap_err();
    assert_eq!(err.notes, vec!["in object pattern at key `list`".to_string()]);
}

#[test]
fn validate_rejects_top_level_rest() {
    assert!(rest().validate().is_err());
}

#[test]
fn debug_rendering() {
    let pattern: Pattern = ObjectPattern::new()
        .entry("a", ArrayPattern::new().element(capture("x")).hole().rest(""))
        .rest("others")
        .into();
    assert_eq!(
        format!("{pattern:?}"),
        r#"{"a": [Identifier(x), _, Rest], "...": Some("others")}"#
    );
}

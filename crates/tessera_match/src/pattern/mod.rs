//! Pattern model.
//!
//! A [`Pattern`] describes the shape a value must have. Patterns are
//! immutable once built and can be reused across any number of matches.
//!
//! # Kinds
//!
//! | Variant      | Matches when                                              |
//! |--------------|-----------------------------------------------------------|
//! | `Literal`    | the value is SameValue-equal to the literal               |
//! | `Regex`      | the value's string form contains a match                  |
//! | `Identifier` | always; binds the value                                   |
//! | `Rest`       | always; in trailing array position, collects the remainder|
//! | `Object`     | every listed key is present and its value matches         |
//! | `Array`      | the value is iterable and its elements match positionally |
//! | `Custom`     | the supplied matcher reports `Matched`                    |
//!
//! # Construction
//!
//! ```text
//! let p = ObjectPattern::new()
//!     .entry("kind", "point")
//!     .entry("x", capture("x"))
//!     .rest("others");
//! let q = ArrayPattern::new().element(1).hole().rest("tail");
//! ```

mod validate;

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tessera_value::{Key, Value};

use crate::{MatchError, MatchResult};

/// User-supplied matching capability.
///
/// Implemented for any `Fn(&Value) -> Result<MatchResult<Value>, MatchError>`.
/// The payload of `Matched` is ignored by the engine: a custom matcher
/// contributes no bindings.
pub trait CustomMatcher: Send + Sync {
    fn match_value(&self, value: &Value) -> Result<MatchResult<Value>, MatchError>;

    /// Name used in logs and error notes.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> CustomMatcher for F
where
    F: Fn(&Value) -> Result<MatchResult<Value>, MatchError> + Send + Sync,
{
    fn match_value(&self, value: &Value) -> Result<MatchResult<Value>, MatchError> {
        self(value)
    }
}

/// Primitive compared by SameValue.
///
/// Holds only primitive values; reference values are rejected by
/// [`Literal::new`].
#[derive(Clone, PartialEq)]
pub struct Literal(Value);

impl Literal {
    /// Wrap a primitive; `None` for arrays, objects, functions and iterators.
    pub fn new(value: Value) -> Option<Self> {
        (!value.is_object_like()).then_some(Literal(value))
    }

    pub const UNDEFINED: Literal = Literal(Value::Undefined);
    pub const NULL: Literal = Literal(Value::Null);

    #[inline]
    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Dispatch category of a pattern, in engine precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternKind {
    Custom,
    Identifier,
    Rest,
    Regex,
    Array,
    Object,
    Literal,
}

/// Structural pattern.
#[derive(Clone)]
pub enum Pattern {
    Literal(Literal),
    Regex(Regex),
    /// Binds the matched value under the name, or under the enclosing
    /// property key/array index when unnamed.
    Identifier(Option<Key>),
    /// Collects the remaining elements; bound only when named.
    Rest(Option<Key>),
    Object(ObjectPattern),
    Array(ArrayPattern),
    Custom(Arc<dyn CustomMatcher>),
}

impl Pattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            Pattern::Literal(_) => PatternKind::Literal,
            Pattern::Regex(_) => PatternKind::Regex,
            Pattern::Identifier(_) => PatternKind::Identifier,
            Pattern::Rest(_) => PatternKind::Rest,
            Pattern::Object(_) => PatternKind::Object,
            Pattern::Array(_) => PatternKind::Array,
            Pattern::Custom(_) => PatternKind::Custom,
        }
    }

    /// Pattern matching only `undefined`.
    pub fn undefined() -> Self {
        Pattern::Literal(Literal::UNDEFINED)
    }

    /// Pattern matching only `null`.
    pub fn null() -> Self {
        Pattern::Literal(Literal::NULL)
    }

    pub fn bigint(n: i128) -> Self {
        Pattern::Literal(Literal(Value::BigInt(n)))
    }

    /// Wrap a custom matcher.
    pub fn custom(matcher: impl CustomMatcher + 'static) -> Self {
        Pattern::Custom(Arc::new(matcher))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(lit) => write!(f, "Literal({lit:?})"),
            Pattern::Regex(re) => write!(f, "Regex(/{}/)", re.as_str()),
            Pattern::Identifier(Some(name)) => write!(f, "Identifier({name})"),
            Pattern::Identifier(None) => write!(f, "Identifier"),
            Pattern::Rest(Some(name)) => write!(f, "Rest({name})"),
            Pattern::Rest(None) => write!(f, "Rest"),
            Pattern::Object(object) => fmt::Debug::fmt(object, f),
            Pattern::Array(array) => fmt::Debug::fmt(array, f),
            Pattern::Custom(matcher) => write!(f, "Custom({})", matcher.name()),
        }
    }
}

// Construction helpers

/// Capture marker from a name.
///
/// - `"name"` binds under `name`
/// - `""` binds under the enclosing key or index
/// - `"...name"` collects the rest under `name`
/// - `"..."` collects the rest without binding it
pub fn capture(name: &str) -> Pattern {
    match name.strip_prefix("...") {
        Some(rest) => Pattern::Rest(named(rest)),
        None => Pattern::Identifier(named(name)),
    }
}

/// Custom matcher from a closure.
pub fn custom<F>(matcher: F) -> Pattern
where
    F: Fn(&Value) -> Result<MatchResult<Value>, MatchError> + Send + Sync + 'static,
{
    Pattern::Custom(Arc::new(matcher))
}

/// Unnamed identifier: binds under the enclosing key or index.
pub fn identifier() -> Pattern {
    Pattern::Identifier(None)
}

/// Unnamed rest marker.
pub fn rest() -> Pattern {
    Pattern::Rest(None)
}

fn named(name: &str) -> Option<Key> {
    (!name.is_empty()).then(|| Key::new(name))
}

// Object patterns

/// Object pattern: keyed sub-patterns plus an optional rest marker.
///
/// The rest marker is kept apart from the keyed entries, so no key can
/// collide with it.
#[derive(Clone, Default)]
pub struct ObjectPattern {
    entries: Vec<(Key, Pattern)>,
    rest: Option<RestMarker>,
}

/// Rest marker of an object pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestMarker {
    pub name: Option<Key>,
}

impl ObjectPattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyed sub-pattern; a repeated key replaces the earlier pattern
    /// in place.
    #[must_use]
    pub fn entry(mut self, key: impl Into<Key>, pattern: impl Into<Pattern>) -> Self {
        let key = key.into();
        let pattern = pattern.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = pattern,
            None => self.entries.push((key, pattern)),
        }
        self
    }

    /// Collect the properties not named by any entry; `""` leaves the
    /// remainder unbound.
    #[must_use]
    pub fn rest(mut self, name: &str) -> Self {
        self.rest = Some(RestMarker { name: named(name) });
        self
    }

    pub fn entries(&self) -> &[(Key, Pattern)] {
        &self.entries
    }

    pub fn rest_marker(&self) -> Option<&RestMarker> {
        self.rest.as_ref()
    }

    /// Keys named by the entries, in order.
    pub fn keys(&self) -> Vec<Key> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

impl fmt::Debug for ObjectPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        map.entries(self.entries.iter().map(|(k, p)| (k, p)));
        if let Some(rest) = &self.rest {
            map.entry(&"...", &rest.name);
        }
        map.finish()
    }
}

// Array patterns

/// Array pattern: positional sub-patterns, `None` marking a hole.
///
/// A trailing [`Pattern::Rest`] collects the remaining elements; without
/// one the matched iterable must have exactly as many elements as there
/// are positions.
#[derive(Clone, Default)]
pub struct ArrayPattern {
    elements: Vec<Option<Pattern>>,
}

impl ArrayPattern {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn element(mut self, pattern: impl Into<Pattern>) -> Self {
        self.elements.push(Some(pattern.into()));
        self
    }

    /// Position that must exist but is not inspected.
    #[must_use]
    pub fn hole(mut self) -> Self {
        self.elements.push(None);
        self
    }

    /// Trailing rest marker; `""` leaves the remainder unbound.
    #[must_use]
    pub fn rest(self, name: &str) -> Self {
        self.element(Pattern::Rest(named(name)))
    }

    pub fn elements(&self) -> &[Option<Pattern>] {
        &self.elements
    }

    /// Split into body positions and the trailing rest name, if the last
    /// element is a rest marker.
    pub fn split_rest(&self) -> (&[Option<Pattern>], Option<Option<&Key>>) {
        match self.elements.split_last() {
            Some((Some(Pattern::Rest(name)), body)) => (body, Some(name.as_ref())),
            _ => (&self.elements, None),
        }
    }
}

impl fmt::Debug for ArrayPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for element in &self.elements {
            match element {
                Some(pattern) => list.entry(pattern),
                None => list.entry(&format_args!("_")),
            };
        }
        list.finish()
    }
}

impl FromIterator<Pattern> for ArrayPattern {
    fn from_iter<I: IntoIterator<Item = Pattern>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().map(Some).collect(),
        }
    }
}

// Conversions

impl From<Literal> for Pattern {
    fn from(lit: Literal) -> Self {
        Pattern::Literal(lit)
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Literal(Literal(Value::Bool(b)))
    }
}

impl From<f64> for Pattern {
    fn from(n: f64) -> Self {
        Pattern::Literal(Literal(Value::Number(n)))
    }
}

impl From<i32> for Pattern {
    fn from(n: i32) -> Self {
        Pattern::Literal(Literal(Value::from(n)))
    }
}

/// String literal; use [`capture`] for identifiers.
impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(Literal(Value::string(s)))
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Literal(Literal(Value::from(s)))
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Pattern::Regex(re)
    }
}

impl From<ObjectPattern> for Pattern {
    fn from(object: ObjectPattern) -> Self {
        Pattern::Object(object)
    }
}

impl From<ArrayPattern> for Pattern {
    fn from(array: ArrayPattern) -> Self {
        Pattern::Array(array)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;

//! Arm combinators.
//!
//! An [`Arm`] pairs a test with a handler. The driver evaluates arms in
//! order against one shared [`Cache`] and stops at the first
//! [`MatchResult::Matched`].
//!
//! - [`when`]: structural pattern, handler receives the bindings
//! - [`whether`]: predicate over the matchable
//! - [`otherwise`]: always matches

use tessera_value::Value;

use crate::{match_pattern, Bindings, Cache, CustomMatcher, MatchError, MatchResult, Pattern};

/// One arm of a match expression.
pub trait Arm<R> {
    fn evaluate(&mut self, matchable: &Value, cache: &mut Cache)
        -> Result<MatchResult<R>, MatchError>;
}

/// Arm built by [`when`].
pub struct When<F> {
    pattern: Pattern,
    handler: F,
}

/// Match `pattern` and hand the bindings to `handler`.
pub fn when<R, F>(pattern: impl Into<Pattern>, handler: F) -> When<F>
where
    F: FnMut(Bindings) -> R,
{
    When {
        pattern: pattern.into(),
        handler,
    }
}

impl<R, F> Arm<R> for When<F>
where
    F: FnMut(Bindings) -> R,
{
    fn evaluate(
        &mut self,
        matchable: &Value,
        cache: &mut Cache,
    ) -> Result<MatchResult<R>, MatchError> {
        let outcome = match_pattern(&self.pattern, matchable, cache)?;
        Ok(outcome.map(&mut self.handler).into())
    }
}

/// Arm built by [`whether`].
pub struct Whether<P, F> {
    predicate: P,
    handler: F,
}

/// Run `handler` on the matchable when `predicate` holds.
pub fn whether<R, P, F>(predicate: P, handler: F) -> Whether<P, F>
where
    P: FnMut(&Value) -> bool,
    F: FnMut(&Value) -> R,
{
    Whether { predicate, handler }
}

impl<R, P, F> Arm<R> for Whether<P, F>
where
    P: FnMut(&Value) -> bool,
    F: FnMut(&Value) -> R,
{
    fn evaluate(&mut self, matchable: &Value, _: &mut Cache) -> Result<MatchResult<R>, MatchError> {
        if !(self.predicate)(matchable) {
            return Ok(MatchResult::Unmatched);
        }
        Ok(MatchResult::Matched((self.handler)(matchable)))
    }
}

/// Arm built by [`otherwise`].
pub struct Otherwise<F> {
    handler: F,
}

/// Catch-all arm.
pub fn otherwise<R, F>(handler: F) -> Otherwise<F>
where
    F: FnMut(&Value) -> R,
{
    Otherwise { handler }
}

impl<R, F> Arm<R> for Otherwise<F>
where
    F: FnMut(&Value) -> R,
{
    fn evaluate(&mut self, matchable: &Value, _: &mut Cache) -> Result<MatchResult<R>, MatchError> {
        Ok(MatchResult::Matched((self.handler)(matchable)))
    }
}

/// Custom matcher for objects whose class, or any prototype's class, is
/// the given name.
#[derive(Clone, Debug)]
pub struct InstanceOf {
    class: String,
}

impl CustomMatcher for InstanceOf {
    fn match_value(&self, value: &Value) -> Result<MatchResult<Value>, MatchError> {
        let mut current = value.as_object();
        while let Some(object) = current {
            if object.class_name() == Some(self.class.as_str()) {
                return Ok(MatchResult::Matched(value.clone()));
            }
            current = object.prototype();
        }
        Ok(MatchResult::Unmatched)
    }

    fn name(&self) -> &str {
        "instance_of"
    }
}

/// Pattern matching instances of `class`.
pub fn instance_of(class: &str) -> Pattern {
    Pattern::custom(InstanceOf {
        class: class.to_string(),
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

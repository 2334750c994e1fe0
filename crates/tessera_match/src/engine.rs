//! Matching engine.
//!
//! [`match_pattern`] is the single entry point. It dispatches on the shape
//! of the pattern alone, never on the matchable; each branch validates the
//! matchable itself and reports a shape mismatch as `None`.
//!
//! Dispatch order: custom matcher, identifier, rest, regex, array, object,
//! literal. Patterns are a closed enum, so the order only matters for
//! readers; no value can fall through from one branch to another.
//!
//! # Caching
//!
//! Every property read and iterator step goes through the [`Cache`], so a
//! single match evaluated against many patterns observes each getter and
//! each iterator position at most once.
//!
//! # Recursion
//!
//! Nested patterns recurse through [`ensure_sufficient_stack`], so
//! arbitrarily deep patterns cannot overflow the native stack.

mod array;
mod literal;
mod object;

pub use array::match_array;
pub use literal::{match_literal, match_regex};
pub use object::match_object;

use tessera_stack::ensure_sufficient_stack;
use tessera_value::{Key, Value};
use tracing::trace;

use crate::errors::capability_fault;
use crate::{Bindings, Cache, CustomMatcher, MatchErrorKind, MatchOutcome, MatchResult, Pattern};

/// Match `pattern` against `matchable`.
///
/// Returns the bindings on success and `None` on mismatch. The only error
/// path is a failing custom matcher.
#[tracing::instrument(level = "trace", skip_all, fields(kind = ?pattern.kind(), matchable = matchable.type_name()))]
pub fn match_pattern(pattern: &Pattern, matchable: &Value, cache: &mut Cache) -> MatchOutcome {
    match_at(pattern, matchable, None, cache)
}

/// Match with `key` as the implicit binding name for unnamed identifiers.
fn match_at(
    pattern: &Pattern,
    matchable: &Value,
    key: Option<&Key>,
    cache: &mut Cache,
) -> MatchOutcome {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Custom(matcher) => match_custom(matcher.as_ref(), matchable),
        Pattern::Identifier(name) => Ok(Some(match_identifier(name.as_ref(), key, matchable))),
        Pattern::Rest(_) => Ok(Some(Bindings::new())),
        Pattern::Regex(regex) => Ok(match_regex(regex, matchable)),
        Pattern::Array(array) => {
            let Some(iterator) = cache.iterator_for(matchable) else {
                trace!(matchable = matchable.type_name(), "not iterable");
                return Ok(None);
            };
            match_array(array, &iterator, cache)
        }
        Pattern::Object(object) => match_object(object, matchable, cache),
        Pattern::Literal(literal) => Ok(match_literal(literal, matchable)),
    })
}

/// Bind `matchable` under `name`, falling back to the enclosing `key`.
///
/// With neither (an unnamed identifier at top level) nothing is bound.
pub fn match_identifier(name: Option<&Key>, key: Option<&Key>, matchable: &Value) -> Bindings {
    match name.or(key) {
        Some(binding) => Bindings::single(binding.clone(), matchable.clone()),
        None => Bindings::new(),
    }
}

/// Run a custom matcher; its payload is discarded.
///
/// Failures surface as [`MatchErrorKind::CapabilityFault`] carrying the
/// matcher's name; notes already attached are kept.
fn match_custom(matcher: &dyn CustomMatcher, matchable: &Value) -> MatchOutcome {
    match matcher.match_value(matchable) {
        Ok(MatchResult::Matched(_)) => Ok(Some(Bindings::new())),
        Ok(MatchResult::Unmatched) => Ok(None),
        Err(err) => {
            trace!(matcher = matcher.name(), error = %err, "custom matcher failed");
            if matches!(err.kind, MatchErrorKind::CapabilityFault { .. }) {
                return Err(err);
            }
            let mut fault = capability_fault(matcher.name(), err.message);
            fault.notes = err.notes;
            Err(fault)
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

//! Object pattern matching.

use tessera_value::Value;
use tracing::trace;

use super::match_at;
use crate::{Bindings, Cache, MatchOutcome, ObjectPattern};

/// Match an object pattern.
///
/// Keys are visited in declaration order and the first missing key or
/// failing sub-pattern ends the match; later keys are never read. The rest
/// remainder is a fresh snapshot and bypasses the cache.
pub fn match_object(pattern: &ObjectPattern, matchable: &Value, cache: &mut Cache) -> MatchOutcome {
    if !cache.register_object(matchable) {
        trace!(matchable = matchable.type_name(), "not object-like");
        return Ok(None);
    }

    let mut bindings = Bindings::new();
    for (key, sub_pattern) in pattern.entries() {
        if !matchable.has_property(key) {
            trace!(%key, "missing key");
            return Ok(None);
        }
        let value = cache.read_property(matchable, key);
        let Some(sub_bindings) = match_at(sub_pattern, &value, Some(key), cache)? else {
            return Ok(None);
        };
        bindings.merge(sub_bindings);
    }

    if let Some(name) = pattern.rest_marker().and_then(|rest| rest.name.as_ref()) {
        bindings.insert(name.clone(), matchable.omit(&pattern.keys()));
    }
    Ok(Some(bindings))
}

//! Array and iterable pattern matching.

use tessera_value::{Heap, IterStep, IteratorValue, Key, Value};
use tracing::trace;

use super::match_at;
use crate::{ArrayPattern, Bindings, Cache, MatchOutcome};

/// Match an array pattern against an iterator obtained for the matchable.
///
/// Positions are read in ascending order through the cache. Without a
/// trailing rest the iterator must be done right after the last position;
/// with one, the remainder is drained and bound if the rest is named.
pub fn match_array(
    pattern: &ArrayPattern,
    iterator: &Heap<IteratorValue>,
    cache: &mut Cache,
) -> MatchOutcome {
    let (body, rest) = pattern.split_rest();

    let mut bindings = Bindings::new();
    for (position, element) in body.iter().enumerate() {
        let IterStep::Yielded(value) = cache.step(iterator, position) else {
            trace!(position, "too few elements");
            return Ok(None);
        };
        let Some(sub_pattern) = element else {
            continue;
        };
        let key = Key::index(position);
        let Some(sub_bindings) = match_at(sub_pattern, &value, Some(&key), cache)? else {
            return Ok(None);
        };
        bindings.merge(sub_bindings);
    }

    match rest {
        None => {
            if !cache.step(iterator, body.len()).is_done() {
                trace!(len = body.len(), "too many elements");
                return Ok(None);
            }
        }
        Some(name) => {
            let remaining = cache.drain_from(iterator, body.len());
            if let Some(name) = name {
                bindings.insert(name.clone(), Value::array(remaining));
            }
        }
    }
    Ok(Some(bindings))
}

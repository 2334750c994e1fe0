//! Literal and regular-expression matching.

use regex::Regex;
use tessera_value::{same_value, Key, Value};
use tracing::trace;

use crate::{Bindings, Literal};

/// SameValue comparison: `NaN` matches `NaN`, `+0` and `-0` do not match.
pub fn match_literal(literal: &Literal, matchable: &Value) -> Option<Bindings> {
    if !same_value(literal.value(), matchable) {
        trace!(?literal, "literal unequal");
        return None;
    }
    Some(Bindings::new())
}

/// Search the string form of `matchable`.
///
/// Named groups that took part in the match are bound as strings.
pub fn match_regex(regex: &Regex, matchable: &Value) -> Option<Bindings> {
    let haystack = matchable.to_js_string();
    let captures = regex.captures(&haystack)?;
    let bindings = regex
        .capture_names()
        .flatten()
        .filter_map(|name| {
            let group = captures.name(name)?;
            Some((Key::new(name), Value::string(group.as_str())))
        })
        .collect();
    Some(bindings)
}

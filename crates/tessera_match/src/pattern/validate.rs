//! Structural check for rest markers.
//!
//! A rest marker only has meaning as the last element of an array pattern
//! (object rest markers are held apart from the entries and are always
//! well placed). Anywhere else the engine treats it as a wildcard, which
//! is rarely what the author meant.

use super::{ArrayPattern, ObjectPattern, Pattern};
use crate::errors::misplaced_rest;
use crate::MatchError;

impl Pattern {
    /// Reject rest markers outside trailing array position.
    ///
    /// Matching does not require this check; it is offered for authors who
    /// want malformed patterns reported up front.
    pub fn validate(&self) -> Result<(), MatchError> {
        match self {
            Pattern::Rest(_) => Err(misplaced_rest("pattern", "at top level")),
            Pattern::Object(object) => validate_object(object),
            Pattern::Array(array) => validate_array(array),
            Pattern::Literal(_)
            | Pattern::Regex(_)
            | Pattern::Identifier(_)
            | Pattern::Custom(_) => Ok(()),
        }
    }
}

fn validate_object(object: &ObjectPattern) -> Result<(), MatchError> {
    for (key, pattern) in object.entries() {
        if let Pattern::Rest(_) = pattern {
            return Err(misplaced_rest("object", format!("at key `{key}`")));
        }
        pattern
            .validate()
            .map_err(|e| e.with_note(format!("in object pattern at key `{key}`")))?;
    }
    Ok(())
}

fn validate_array(array: &ArrayPattern) -> Result<(), MatchError> {
    let (body, _) = array.split_rest();
    for (index, element) in body.iter().enumerate() {
        let Some(pattern) = element else { continue };
        if let Pattern::Rest(_) = pattern {
            return Err(misplaced_rest("array", format!("at index {index}")));
        }
        pattern
            .validate()
            .map_err(|e| e.with_note(format!("in array pattern at index {index}")))?;
    }
    Ok(())
}

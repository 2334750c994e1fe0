//! Error types for pattern matching.
//!
//! Matching itself never fails: a pattern that does not fit yields `None`.
//! Errors come from two places only:
//! - custom matchers, whose failures propagate to the caller
//! - the match driver, when no arm matched and no fallback was given
//!
//! # Structured Error Categories
//!
//! `MatchErrorKind` provides typed categories. Factory functions
//! (e.g., `non_exhaustive_match()`) are the public API; they populate both
//! `kind` and `message`.

use std::fmt;

/// Result of running a matcher: bindings on success, `None` on mismatch.
pub type MatchOutcome = Result<Option<crate::Bindings>, MatchError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MatchErrorKind {
    /// A custom matcher reported a failure while probing a value.
    #[error("custom matcher `{matcher}` failed: {message}")]
    CapabilityFault { matcher: String, message: String },

    /// A rest marker outside trailing position of an array pattern.
    ///
    /// Only reported by [`Pattern::validate`](crate::Pattern::validate); the
    /// engine itself treats such a marker as an unconditional match.
    #[error("rest marker {position} of {container} is not in trailing position")]
    MisplacedRest {
        container: &'static str,
        position: String,
    },

    /// No arm matched and no fallback arm was supplied.
    #[error("non-exhaustive match: no arm matched a value of type {type_name}")]
    NonExhaustiveMatch { type_name: &'static str },

    /// Free-form error raised by user code.
    #[error("{message}")]
    Custom { message: String },
}

/// Matching error.
#[derive(Clone, Debug)]
pub struct MatchError {
    /// Structured error category.
    pub kind: MatchErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Secondary context, outermost last.
    pub notes: Vec<String>,
}

impl MatchError {
    /// Create an error with just a message, using the `Custom` kind.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: MatchErrorKind::Custom {
                message: message.clone(),
            },
            message,
            notes: Vec::new(),
        }
    }

    fn from_kind(kind: MatchErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[inline]
    pub fn is_non_exhaustive(&self) -> bool {
        matches!(self.kind, MatchErrorKind::NonExhaustiveMatch { .. })
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MatchError {}

// Factory functions

/// A custom matcher named `matcher` failed.
#[cold]
pub fn capability_fault(matcher: &str, message: impl Into<String>) -> MatchError {
    MatchError::from_kind(MatchErrorKind::CapabilityFault {
        matcher: matcher.to_string(),
        message: message.into(),
    })
}

/// A rest marker at `position` inside a `container` pattern is misplaced.
#[cold]
pub fn misplaced_rest(container: &'static str, position: impl Into<String>) -> MatchError {
    MatchError::from_kind(MatchErrorKind::MisplacedRest {
        container,
        position: position.into(),
    })
}

/// No arm matched a value of type `type_name`.
#[cold]
pub fn non_exhaustive_match(type_name: &'static str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::NonExhaustiveMatch { type_name })
}

//! Match driver.
//!
//! ```text
//! let label = match_value(value)
//!     .when(ArrayPattern::new().element(0).rest("tail"), |b| ...)
//!     .whether(|v| v.is_iterable(), |_| ...)
//!     .otherwise(|_| ...)?;
//! ```
//!
//! One evaluation owns one [`Cache`]. Arms run in order and the first
//! match wins; iterators opened along the way are closed before the
//! evaluation returns, including on error.

use tessera_value::Value;
use tracing::debug;

use crate::arm::{when, whether, Arm};
use crate::errors::non_exhaustive_match;
use crate::{Bindings, Cache, MatchError, MatchResult, Pattern};

/// Pending match expression over one matchable.
pub struct Match<'a, R> {
    matchable: Value,
    arms: Vec<Box<dyn Arm<R> + 'a>>,
}

/// Start a match expression over `matchable`.
pub fn match_value<'a, R>(matchable: impl Into<Value>) -> Match<'a, R> {
    Match {
        matchable: matchable.into(),
        arms: Vec::new(),
    }
}

impl<'a, R> Match<'a, R> {
    /// Add an arbitrary arm.
    #[must_use]
    pub fn arm(mut self, arm: impl Arm<R> + 'a) -> Self {
        self.arms.push(Box::new(arm));
        self
    }

    /// Add a structural arm; see [`when`].
    #[must_use]
    pub fn when(self, pattern: impl Into<Pattern>, handler: impl FnMut(Bindings) -> R + 'a) -> Self {
        self.arm(when(pattern, handler))
    }

    /// Add a predicate arm; see [`whether`].
    #[must_use]
    pub fn whether(
        self,
        predicate: impl FnMut(&Value) -> bool + 'a,
        handler: impl FnMut(&Value) -> R + 'a,
    ) -> Self {
        self.arm(whether(predicate, handler))
    }

    /// Evaluate the arms, falling back to `fallback` when none matched.
    pub fn otherwise(mut self, fallback: impl FnOnce(&Value) -> R) -> Result<R, MatchError> {
        let mut cache = Cache::new();
        let outcome = match self.select(&mut cache) {
            Ok(Some(result)) => Ok(result),
            Ok(None) => {
                debug!("no arm matched, using fallback");
                Ok(fallback(&self.matchable))
            }
            Err(err) => Err(err),
        };
        cache.close_iterators();
        outcome
    }

    /// Evaluate the arms; `NonExhaustiveMatch` when none matched.
    pub fn finish(mut self) -> Result<R, MatchError> {
        let mut cache = Cache::new();
        let outcome = self.select(&mut cache);
        cache.close_iterators();
        outcome?.ok_or_else(|| non_exhaustive_match(self.matchable.type_name()))
    }

    fn select(&mut self, cache: &mut Cache) -> Result<Option<R>, MatchError> {
        debug!(
            matchable = self.matchable.type_name(),
            arms = self.arms.len(),
            "evaluating match"
        );
        for (index, arm) in self.arms.iter_mut().enumerate() {
            match arm.evaluate(&self.matchable, cache) {
                Ok(MatchResult::Matched(result)) => {
                    debug!(index, "arm matched");
                    return Ok(Some(result));
                }
                Ok(MatchResult::Unmatched) => {}
                Err(err) => {
                    debug!(index, error = %err, "arm failed");
                    return Err(err.with_note(format!("while evaluating arm {index}")));
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

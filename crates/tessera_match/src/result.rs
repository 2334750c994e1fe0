//! Matched/unmatched outcome of arms and custom matchers.

/// Outcome of an arm or a custom matcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchResult<T> {
    Matched(T),
    Unmatched,
}

impl<T> MatchResult<T> {
    #[inline]
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            MatchResult::Matched(value) => Some(value),
            MatchResult::Unmatched => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> MatchResult<U> {
        match self {
            MatchResult::Matched(value) => MatchResult::Matched(f(value)),
            MatchResult::Unmatched => MatchResult::Unmatched,
        }
    }
}

impl<T> From<Option<T>> for MatchResult<T> {
    fn from(option: Option<T>) -> Self {
        option.map_or(MatchResult::Unmatched, MatchResult::Matched)
    }
}

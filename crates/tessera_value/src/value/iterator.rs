//! Stateful pull iterators.
//!
//! Unlike a functional iterator that returns a new position on every step,
//! an `IteratorValue` is a single mutable cursor shared by every clone of the
//! `Value` holding it, the way a generator object is. Advancing it through one
//! handle is observed through all of them, which is exactly why the matcher
//! caches each step it takes.

use std::fmt;

use parking_lot::Mutex;

use super::heap::Heap;
use super::Value;

/// Boxed element source behind an iterator.
type Source = Box<dyn Iterator<Item = Value> + Send>;

/// Cleanup capability invoked when the iterator is closed.
type CloseHook = Box<dyn FnOnce() + Send>;

/// One observed step of an iterator.
#[derive(Clone, Debug, PartialEq)]
pub enum IterStep {
    /// The iterator produced a value.
    Yielded(Value),
    /// The iterator is exhausted (or was closed).
    Done,
}

impl IterStep {
    /// Whether this step reports completion.
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, IterStep::Done)
    }

    /// The yielded value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            IterStep::Yielded(value) => Some(value),
            IterStep::Done => None,
        }
    }
}

struct IteratorState {
    /// `None` once the source reported exhaustion or the iterator was closed.
    source: Option<Source>,
    /// Number of values the source has produced.
    pulled: usize,
    closed: bool,
    on_close: Option<CloseHook>,
}

/// A forward-only, stateful iterator.
pub struct IteratorValue {
    label: &'static str,
    state: Mutex<IteratorState>,
}

impl IteratorValue {
    /// Create an iterator over an arbitrary source.
    pub fn new(source: impl Iterator<Item = Value> + Send + 'static) -> Self {
        Self::labelled("Iterator", Box::new(source))
    }

    /// Create a generator-style iterator.
    ///
    /// Behaves like [`IteratorValue::new`]; the label only affects string
    /// coercion (`[object Generator]`).
    pub fn generator(source: impl Iterator<Item = Value> + Send + 'static) -> Self {
        Self::labelled("Generator", Box::new(source))
    }

    /// Attach a cleanup hook that runs when the iterator is closed.
    #[must_use]
    pub fn with_close_hook(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.state.get_mut().on_close = Some(Box::new(hook));
        self
    }

    pub(crate) fn over_array(items: Heap<Vec<Value>>) -> Self {
        let len = items.len();
        let source = (0..len).filter_map(move |i| items.get(i).cloned());
        Self::labelled("Array Iterator", Box::new(source))
    }

    pub(crate) fn over_str(text: &str) -> Self {
        let chars: Vec<Value> = text.chars().map(|c| Value::string(c.to_string())).collect();
        Self::labelled("String Iterator", Box::new(chars.into_iter()))
    }

    fn labelled(label: &'static str, source: Source) -> Self {
        IteratorValue {
            label,
            state: Mutex::new(IteratorState {
                source: Some(source),
                pulled: 0,
                closed: false,
                on_close: None,
            }),
        }
    }

    /// Advance the iterator by one step.
    ///
    /// Once `Done` has been reported, every further call reports `Done`
    /// without touching the source again.
    pub fn next(&self) -> IterStep {
        let mut state = self.state.lock();
        let next = state.source.as_mut().and_then(|source| source.next());
        match next {
            Some(value) => {
                state.pulled = state.pulled.saturating_add(1);
                IterStep::Yielded(value)
            }
            None => {
                state.source = None;
                IterStep::Done
            }
        }
    }

    /// Close the iterator, running its cleanup hook.
    ///
    /// Returns `true` if this call closed it, `false` if it was already
    /// closed. The hook runs at most once over the iterator's lifetime.
    pub fn close(&self) -> bool {
        let hook = {
            let mut state = self.state.lock();
            if state.closed {
                return false;
            }
            state.closed = true;
            state.source = None;
            state.on_close.take()
        };
        if let Some(hook) = hook {
            hook();
        }
        true
    }

    /// Whether [`IteratorValue::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of values pulled from the source so far.
    pub fn pulled(&self) -> usize {
        self.state.lock().pulled
    }

    /// Kind label used in string coercion (`Generator`, `Array Iterator`, ...).
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Debug for IteratorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("IteratorValue")
            .field("label", &self.label)
            .field("pulled", &state.pulled)
            .field("exhausted", &state.source.is_none())
            .field("closed", &state.closed)
            .finish()
    }
}

//! Match-scoped memo of property reads and iterator steps.
//!
//! One [`Cache`] lives for one match invocation and is shared by every arm,
//! so that side-effecting sources are observed once:
//! - a property getter runs at most once per (object, key)
//! - an iterator is advanced at most once per position
//!
//! # Identity
//!
//! Tables are keyed by [`Identity`]. Each memo holds a clone of the value it
//! describes, so no address can be reused while the cache is alive.
//!
//! # Iterators
//!
//! The first array pattern that looks at an iterable opens an iterator for
//! it and records it under the iterable's identity; later array patterns
//! against the same iterable reuse that iterator and its memo. Strings carry
//! no identity and get a fresh iterator every time.
//!
//! Every iterator the cache handed out is closed exactly once, either by
//! [`Cache::close_iterators`] or when the cache is dropped.

use rustc_hash::FxHashMap;
use tessera_value::{Heap, Identity, IterStep, IteratorValue, Key, Value};
use tracing::{debug, trace};

/// Memoized reads of one object-like value.
struct PropertyMemo {
    owner: Value,
    values: FxHashMap<Key, Value>,
}

/// Memoized steps of one iterator.
///
/// `steps` holds results obtained by positional reads, in order, ending at
/// the first `Done` if one was seen. `tail` holds the elements pulled by a
/// rest drain beyond the last positional step.
struct IteratorMemo {
    iterator: Heap<IteratorValue>,
    steps: Vec<IterStep>,
    tail: Vec<Value>,
    drained: bool,
}

impl IteratorMemo {
    fn new(iterator: Heap<IteratorValue>) -> Self {
        Self {
            iterator,
            steps: Vec::new(),
            tail: Vec::new(),
            drained: false,
        }
    }

    fn exhausted(&self) -> bool {
        self.drained || self.steps.last().is_some_and(IterStep::is_done)
    }

    fn step(&mut self, position: usize) -> IterStep {
        if let Some(step) = self.steps.get(position) {
            return step.clone();
        }
        if self.exhausted() {
            return position
                .checked_sub(self.steps.len())
                .and_then(|offset| self.tail.get(offset))
                .cloned()
                .map_or(IterStep::Done, IterStep::Yielded);
        }
        while self.steps.len() <= position {
            let step = self.iterator.next();
            let done = step.is_done();
            self.steps.push(step);
            if done {
                return IterStep::Done;
            }
        }
        self.steps.get(position).cloned().unwrap_or(IterStep::Done)
    }

    fn drain_from(&mut self, position: usize) -> Vec<Value> {
        let mut remaining = Vec::new();
        for step in self.steps.iter().skip(position) {
            match step {
                IterStep::Yielded(value) => remaining.push(value.clone()),
                IterStep::Done => return remaining,
            }
        }
        if !self.drained {
            while let IterStep::Yielded(value) = self.iterator.next() {
                self.tail.push(value);
            }
            self.drained = true;
        }
        let offset = position.saturating_sub(self.steps.len());
        remaining.extend(self.tail.iter().skip(offset).cloned());
        remaining
    }
}

/// Match-scoped memo shared by all arms of one match.
#[derive(Default)]
pub struct Cache {
    properties: FxHashMap<Identity, PropertyMemo>,
    /// Iterable and the iterator opened for it, keyed by the iterable.
    sources: FxHashMap<Identity, (Value, Heap<IteratorValue>)>,
    /// Step memo for each iterator, keyed by the iterator.
    iterators: FxHashMap<Identity, IteratorMemo>,
    /// Iterators to close, in the order they were first handed out.
    opened: Vec<Heap<IteratorValue>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `value` has been visited by an object or array pattern.
    pub fn contains(&self, value: &Value) -> bool {
        value.identity().is_some_and(|id| {
            self.properties.contains_key(&id)
                || self.sources.contains_key(&id)
                || self.iterators.contains_key(&id)
        })
    }

    /// Memoized value of `owner[key]`, if it has been read.
    pub fn cached_property(&self, owner: &Value, key: &str) -> Option<&Value> {
        let memo = self.properties.get(&owner.identity()?)?;
        memo.values.get(key)
    }

    /// Number of properties memoized for `owner`; `None` if never visited.
    pub fn cached_property_count(&self, owner: &Value) -> Option<usize> {
        self.properties
            .get(&owner.identity()?)
            .map(|memo| memo.values.len())
    }

    /// Positional steps memoized for `iterator`; `None` if never visited.
    pub fn cached_steps(&self, iterator: &Heap<IteratorValue>) -> Option<&[IterStep]> {
        self.iterators
            .get(&Identity::of(iterator))
            .map(|memo| memo.steps.as_slice())
    }

    /// Number of iterators the cache will close.
    pub fn open_iterator_count(&self) -> usize {
        self.opened.len()
    }

    /// Close every iterator handed out so far.
    ///
    /// Returns how many were still open. Iterators stay closed; memoized
    /// steps remain readable.
    pub fn close_iterators(&mut self) -> usize {
        let closed = self
            .opened
            .drain(..)
            .filter(|iterator| iterator.close())
            .count();
        if closed > 0 {
            debug!(closed, "closed iterators");
        }
        closed
    }

    // Engine access

    /// Record `owner` as visited. Returns `false` for values that have no
    /// properties to memoize.
    pub(crate) fn register_object(&mut self, owner: &Value) -> bool {
        let Some(id) = owner.identity() else {
            return false;
        };
        self.properties.entry(id).or_insert_with(|| PropertyMemo {
            owner: owner.clone(),
            values: FxHashMap::default(),
        });
        true
    }

    /// Read `owner[key]`, running any getter at most once per cache.
    pub(crate) fn read_property(&mut self, owner: &Value, key: &Key) -> Value {
        let Some(id) = owner.identity() else {
            return owner.get_property(key);
        };
        let memo = self.properties.entry(id).or_insert_with(|| PropertyMemo {
            owner: owner.clone(),
            values: FxHashMap::default(),
        });
        let owner = &memo.owner;
        memo.values
            .entry(key.clone())
            .or_insert_with(|| {
                trace!(%key, "reading property");
                owner.get_property(key)
            })
            .clone()
    }

    /// Iterator for `matchable`, opening and registering one on first use.
    ///
    /// `None` when the value is not iterable.
    pub(crate) fn iterator_for(&mut self, matchable: &Value) -> Option<Heap<IteratorValue>> {
        let id = matchable.identity();
        if let Some((_, iterator)) = id.and_then(|id| self.sources.get(&id)) {
            return Some(iterator.clone());
        }
        let iterator = matchable.iter()?;
        if let Some(id) = id {
            self.sources
                .insert(id, (matchable.clone(), iterator.clone()));
        }
        let iterator_id = Identity::of(&iterator);
        if !self.iterators.contains_key(&iterator_id) {
            trace!(label = iterator.label(), "opened iterator");
            self.iterators
                .insert(iterator_id, IteratorMemo::new(iterator.clone()));
            self.opened.push(iterator.clone());
        }
        Some(iterator)
    }

    /// Step `position` of `iterator`, advancing it only past positions not
    /// yet memoized.
    pub(crate) fn step(&mut self, iterator: &Heap<IteratorValue>, position: usize) -> IterStep {
        self.memo(iterator).step(position)
    }

    /// All elements from `position` on, exhausting the iterator.
    pub(crate) fn drain_from(
        &mut self,
        iterator: &Heap<IteratorValue>,
        position: usize,
    ) -> Vec<Value> {
        self.memo(iterator).drain_from(position)
    }

    fn memo(&mut self, iterator: &Heap<IteratorValue>) -> &mut IteratorMemo {
        self.iterators
            .entry(Identity::of(iterator))
            .or_insert_with(|| {
                self.opened.push(iterator.clone());
                IteratorMemo::new(iterator.clone())
            })
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        self.close_iterators();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

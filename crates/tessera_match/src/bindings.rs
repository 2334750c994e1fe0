//! Named values produced by a successful match.
//!
//! Insertion order is preserved. Merging is last-write-wins: a later
//! binding for an existing key replaces the value but keeps the key's
//! original position.

use std::fmt;

use smallvec::SmallVec;
use tessera_value::{Key, ObjectBuilder, Value};

/// Most patterns bind a handful of names.
type Entries = SmallVec<[(Key, Value); 4]>;

/// Map from binding name to captured value.
#[derive(Clone, Default)]
pub struct Bindings {
    entries: Entries,
}

impl Bindings {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings holding exactly one entry.
    pub fn single(key: Key, value: Value) -> Self {
        let mut bindings = Self::new();
        bindings.entries.push((key, value));
        bindings
    }

    /// Bind `key`, replacing any previous value in place.
    pub fn insert(&mut self, key: Key, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Fold `other` into `self`; entries of `other` win on conflict.
    pub fn merge(&mut self, other: Bindings) {
        if self.entries.is_empty() {
            self.entries = other.entries;
            return;
        }
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Plain object with one enumerable field per binding.
    pub fn into_object(self) -> Value {
        self.entries
            .into_iter()
            .fold(ObjectBuilder::new(), |builder, (k, v)| builder.field(k, v))
            .build()
    }
}

/// Order-insensitive: equal when both bind the same names to SameValue-equal
/// values.
impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k.as_str()).is_some_and(|o| o == v))
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        for (k, v) in iter {
            bindings.insert(k.into(), v.into());
        }
        bindings
    }
}

impl IntoIterator for Bindings {
    type Item = (Key, Value);
    type IntoIter = smallvec::IntoIter<[(Key, Value); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

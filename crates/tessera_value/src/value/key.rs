//! Property and binding keys.

use std::borrow::Borrow;
use std::fmt;

use super::heap::Heap;

/// A property key (objects), a position (arrays), or a capture name.
///
/// Positions are stored in canonical decimal form, so `Key::index(0)` and
/// `Key::from("0")` are the same key. An array capture at index 0 and an
/// object capture of property `"0"` therefore address one binding.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Heap<str>);

impl Key {
    /// Create a key from a property or capture name.
    pub fn new(name: &str) -> Self {
        Key(Heap::from_str(name))
    }

    /// Create the key for a 0-based position.
    pub fn index(index: usize) -> Self {
        Key(Heap::from_string(index.to_string()))
    }

    /// The key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key back into a position.
    ///
    /// Only canonical decimal forms qualify: `"01"` and `"+1"` are ordinary
    /// names, not positions.
    pub fn as_index(&self) -> Option<usize> {
        let s = self.as_str();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if s.len() > 1 && s.starts_with('0') {
            return None;
        }
        s.parse().ok()
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::new(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key(Heap::from_string(name))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::index(index)
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Runtime values.
//!
//! # Construction
//!
//! Reference values are only created through factory methods and
//! [`ObjectBuilder`]; `Heap::new` is crate-private.
//!
//! ```text
//! let s = Value::string("hello");
//! let xs = Value::array(vec![Value::from(1), Value::from(2)]);
//! let gen = Value::generator((0..3).map(Value::from));
//! let obj = ObjectBuilder::new().field("a", 1).build();
//! ```
//!
//! # Object-likeness
//!
//! Arrays, objects, functions and iterators are object-like: they carry an
//! identity and can be probed for properties. Arrays expose their indices
//! (enumerable) and `length` (non-enumerable); functions expose their own
//! properties plus a non-enumerable `name`.

mod heap;
mod iterator;
mod key;
mod number;
mod object;

use std::fmt;

pub use heap::Heap;
pub use iterator::{IterStep, IteratorValue};
pub use key::Key;
pub use number::number_to_string;
pub use object::{FunctionValue, GetterFn, NativeFn, ObjectBuilder, ObjectValue, Property};

use crate::ecma::same_value;

/// Identity token of a reference value.
///
/// Only meaningful while some handle to the value is alive; holders that
/// key tables by identity must keep a clone of the value alongside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity(usize);

impl Identity {
    /// Identity of the allocation behind `heap`.
    #[inline]
    pub fn of<T: ?Sized>(heap: &Heap<T>) -> Self {
        Identity(heap.addr())
    }
}

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Primitives
    Undefined,
    Null,
    Bool(bool),
    /// IEEE-754 double, including `NaN` and both zeros.
    Number(f64),
    BigInt(i128),
    Str(Heap<str>),

    // Reference types
    Array(Heap<Vec<Value>>),
    Object(Heap<ObjectValue>),
    Function(Heap<FunctionValue>),
    /// Stateful iterator; clones share one cursor.
    Iterator(Heap<IteratorValue>),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    #[inline]
    pub fn bigint(n: i128) -> Self {
        Value::BigInt(n)
    }

    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Heap::from_str(s.as_ref()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    /// Wrap an iterator value.
    #[inline]
    pub fn iterator(iter: IteratorValue) -> Self {
        Value::Iterator(Heap::new(iter))
    }

    /// Create a generator over `source`.
    pub fn generator(source: impl Iterator<Item = Value> + Send + 'static) -> Self {
        Value::iterator(IteratorValue::generator(source))
    }

    /// Create a callable with no extra properties.
    pub fn function(name: &str, body: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        ObjectBuilder::new().into_function(name, body)
    }

    /// Create an empty plain object.
    pub fn object() -> Self {
        ObjectBuilder::new().build()
    }
}

// Inspection

impl Value {
    /// Type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Iterator(_) => "iterator",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Heap<ObjectValue>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_iterator(&self) -> Option<&Heap<IteratorValue>> {
        match self {
            Value::Iterator(iter) => Some(iter),
            _ => None,
        }
    }

    /// Identity of a reference value; `None` for primitives.
    pub fn identity(&self) -> Option<Identity> {
        let addr = match self {
            Value::Array(items) => items.addr(),
            Value::Object(object) => object.addr(),
            Value::Function(func) => func.addr(),
            Value::Iterator(iter) => iter.addr(),
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::BigInt(_)
            | Value::Str(_) => return None,
        };
        Some(Identity(addr))
    }

    /// Whether the value is an object or a callable.
    #[inline]
    pub fn is_object_like(&self) -> bool {
        self.identity().is_some()
    }

    /// Whether the value can produce an iterator.
    pub fn is_iterable(&self) -> bool {
        match self {
            Value::Array(_) | Value::Str(_) | Value::Iterator(_) => true,
            Value::Object(object) => object.is_iterable(),
            _ => false,
        }
    }
}

// Property access

impl Value {
    /// Whether `key` is an own or inherited property of an object-like value.
    ///
    /// Always `false` for primitives.
    pub fn has_property(&self, key: &Key) -> bool {
        match self {
            Value::Array(items) => {
                key.as_str() == "length" || key.as_index().is_some_and(|i| i < items.len())
            }
            Value::Object(object) => object.has_property(key.as_str()),
            Value::Function(func) => func.properties().has_property(key.as_str()),
            _ => false,
        }
    }

    /// Read a property, running getters; `Undefined` when absent.
    pub fn get_property(&self, key: &Key) -> Value {
        match self {
            Value::Array(items) => {
                if key.as_str() == "length" {
                    return Value::from(items.len());
                }
                key.as_index()
                    .and_then(|i| items.get(i))
                    .cloned()
                    .unwrap_or(Value::Undefined)
            }
            Value::Object(object) => object.get(key.as_str()),
            Value::Function(func) => func.properties().get(key.as_str()),
            _ => Value::Undefined,
        }
    }

    /// Snapshot of own enumerable properties in order.
    pub fn own_enumerable_entries(&self) -> Vec<(Key, Value)> {
        match self {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| (Key::index(i), item.clone()))
                .collect(),
            Value::Object(object) => object.own_enumerable_entries(),
            Value::Function(func) => func.properties().own_enumerable_entries(),
            _ => Vec::new(),
        }
    }

    /// Fresh plain object holding the own enumerable properties not in
    /// `excluded`.
    pub fn omit(&self, excluded: &[Key]) -> Value {
        object::object_without(self.own_enumerable_entries(), excluded)
    }

    /// Obtain an iterator over the value.
    ///
    /// Arrays, strings and iterable objects produce a fresh iterator on every
    /// call; an iterator value returns itself, so its cursor is shared.
    pub fn iter(&self) -> Option<Heap<IteratorValue>> {
        match self {
            Value::Iterator(iter) => Some(iter.clone()),
            Value::Array(items) => Some(Heap::new(IteratorValue::over_array(items.clone()))),
            Value::Str(s) => Some(Heap::new(IteratorValue::over_str(s))),
            Value::Object(object) => object.make_iterator().map(Heap::new),
            _ => None,
        }
    }
}

// String coercion

impl Value {
    /// ECMAScript `String(value)`.
    pub fn to_js_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_to_string(*n),
            Value::BigInt(n) => n.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Undefined | Value::Null => String::new(),
                    other => other.to_js_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Function(func) => format!("function {}() {{ [native code] }}", func.name()),
            Value::Iterator(iter) => format!("[object {}]", iter.label()),
        }
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    #[expect(
        clippy::cast_precision_loss,
        reason = "lengths and indices stay far below 2^53"
    )]
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Heap::from_string(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

// Trait Implementations

/// SameValue for primitives, identity for reference values.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        same_value(self, other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n:?})"),
            Value::BigInt(n) => write!(f, "BigInt({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Array(items) => write!(f, "Array({:?})", &**items),
            Value::Object(object) => write!(f, "Object({:?})", &**object),
            Value::Function(func) => write!(f, "Function({:?})", &**func),
            Value::Iterator(iter) => write!(f, "Iterator({})", iter.label()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_js_string())
    }
}

//! Objects and callables.
//!
//! Objects are immutable once built: an ordered list of own properties,
//! an optional prototype for inherited lookups, and an optional class name.
//! Properties are either plain data or accessors whose getter runs on every
//! read, which is what makes read memoization observable.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::heap::Heap;
use super::iterator::IteratorValue;
use super::key::Key;
use super::Value;

/// Getter closure of an accessor property.
pub type GetterFn = dyn Fn() -> Value + Send + Sync;

/// Native body of a callable value.
pub type NativeFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Factory producing a fresh iterator for an iterable object.
type IterFactory = dyn Fn() -> IteratorValue + Send + Sync;

/// How a property stores its value.
#[derive(Clone)]
enum Slot {
    Data(Value),
    Accessor(Arc<GetterFn>),
}

/// A single own property.
#[derive(Clone)]
pub struct Property {
    slot: Slot,
    enumerable: bool,
}

impl Property {
    /// Read the property, invoking the getter for accessors.
    pub fn read(&self) -> Value {
        match &self.slot {
            Slot::Data(value) => value.clone(),
            Slot::Accessor(getter) => getter(),
        }
    }

    /// Whether the property shows up in enumeration (and rest aggregates).
    #[inline]
    pub fn is_enumerable(&self) -> bool {
        self.enumerable
    }

    /// Whether reading this property runs a getter.
    #[inline]
    pub fn is_accessor(&self) -> bool {
        matches!(self.slot, Slot::Accessor(_))
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Slot::Data(value) => write!(f, "{value:?}"),
            Slot::Accessor(_) => write!(f, "<getter>"),
        }
    }
}

/// Plain object.
#[derive(Clone, Default)]
pub struct ObjectValue {
    class: Option<Heap<str>>,
    properties: Vec<(Key, Property)>,
    prototype: Option<Heap<ObjectValue>>,
    iterate: Option<Arc<IterFactory>>,
}

impl ObjectValue {
    /// Class name, if the object was built with one.
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// The prototype object, if any.
    pub fn prototype(&self) -> Option<&Heap<ObjectValue>> {
        self.prototype.as_ref()
    }

    /// Look up an own property.
    pub fn own_property(&self, key: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, property)| property)
    }

    /// Look up an own or inherited property, nearest first.
    pub fn find_property(&self, key: &str) -> Option<&Property> {
        let mut current = self;
        loop {
            if let Some(property) = current.own_property(key) {
                return Some(property);
            }
            current = current.prototype.as_deref()?;
        }
    }

    /// Whether the key is an own or inherited property.
    pub fn has_property(&self, key: &str) -> bool {
        self.find_property(key).is_some()
    }

    /// Read an own or inherited property; `Undefined` when absent.
    pub fn get(&self, key: &str) -> Value {
        self.find_property(key)
            .map_or(Value::Undefined, Property::read)
    }

    /// Own keys in insertion order, enumerable or not.
    pub fn own_keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.properties.iter().map(|(key, _)| key)
    }

    /// Snapshot of own enumerable properties, reading accessors.
    pub fn own_enumerable_entries(&self) -> Vec<(Key, Value)> {
        self.properties
            .iter()
            .filter(|(_, property)| property.enumerable)
            .map(|(key, property)| (key.clone(), property.read()))
            .collect()
    }

    /// Whether the object can produce an iterator.
    pub fn is_iterable(&self) -> bool {
        self.iterate.is_some()
    }

    pub(crate) fn make_iterator(&self) -> Option<IteratorValue> {
        self.iterate.as_ref().map(|factory| factory())
    }

    fn insert(&mut self, key: Key, property: Property) {
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = property,
            None => self.properties.push((key, property)),
        }
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(class) = &self.class {
            write!(f, "{} ", &**class)?;
        }
        f.debug_map()
            .entries(self.properties.iter().map(|(k, p)| (k, p)))
            .finish()
    }
}

/// Builder for objects and callables.
///
/// ```text
/// let point = ObjectBuilder::new()
///     .field("x", 1)
///     .field("y", 2)
///     .getter("norm", || Value::number(2.24))
///     .build();
/// ```
#[derive(Default)]
pub struct ObjectBuilder {
    object: ObjectValue,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class name reported by `instance_of`-style checks.
    #[must_use]
    pub fn class(mut self, name: &str) -> Self {
        self.object.class = Some(Heap::from_str(name));
        self
    }

    /// Inherit properties from `prototype`.
    #[must_use]
    pub fn prototype(mut self, prototype: Heap<ObjectValue>) -> Self {
        self.object.prototype = Some(prototype);
        self
    }

    /// Add an enumerable data property. A repeated key replaces the earlier
    /// value but keeps its position.
    #[must_use]
    pub fn field(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.object.insert(
            key.into(),
            Property {
                slot: Slot::Data(value.into()),
                enumerable: true,
            },
        );
        self
    }

    /// Add a non-enumerable data property.
    #[must_use]
    pub fn hidden(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.object.insert(
            key.into(),
            Property {
                slot: Slot::Data(value.into()),
                enumerable: false,
            },
        );
        self
    }

    /// Add an enumerable accessor property.
    #[must_use]
    pub fn getter(
        mut self,
        key: impl Into<Key>,
        getter: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.object.insert(
            key.into(),
            Property {
                slot: Slot::Accessor(Arc::new(getter)),
                enumerable: true,
            },
        );
        self
    }

    /// Make the object iterable; `factory` runs once per iteration request.
    #[must_use]
    pub fn iterable(mut self, factory: impl Fn() -> IteratorValue + Send + Sync + 'static) -> Self {
        self.object.iterate = Some(Arc::new(factory));
        self
    }

    /// Finish as a plain object value.
    pub fn build(self) -> Value {
        Value::Object(Heap::new(self.object))
    }

    /// Finish as a callable value carrying the collected properties.
    ///
    /// The function gets a non-enumerable `name` property unless one was
    /// already defined.
    pub fn into_function(
        mut self,
        name: &str,
        body: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Value {
        if self.object.own_property("name").is_none() {
            self.object.insert(
                Key::new("name"),
                Property {
                    slot: Slot::Data(Value::string(name)),
                    enumerable: false,
                },
            );
        }
        Value::Function(Heap::new(FunctionValue {
            name: Heap::from_str(name),
            body: Arc::new(body),
            properties: self.object,
        }))
    }
}

/// Callable value.
pub struct FunctionValue {
    name: Heap<str>,
    body: Arc<NativeFn>,
    properties: ObjectValue,
}

impl FunctionValue {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.body)(args)
    }

    /// Properties attached to the function object.
    pub fn properties(&self) -> &ObjectValue {
        &self.properties
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}", &*self.name)
    }
}

/// Copy `entries` minus `excluded` into a fresh plain object.
pub(crate) fn object_without(entries: Vec<(Key, Value)>, excluded: &[Key]) -> Value {
    let excluded: FxHashSet<&str> = excluded.iter().map(Key::as_str).collect();
    let object = ObjectValue {
        properties: entries
            .into_iter()
            .filter(|(key, _)| !excluded.contains(key.as_str()))
            .map(|(key, value)| {
                (
                    key,
                    Property {
                        slot: Slot::Data(value),
                        enumerable: true,
                    },
                )
            })
            .collect(),
        ..ObjectValue::default()
    };
    Value::Object(Heap::new(object))
}

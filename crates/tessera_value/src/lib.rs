//! Tessera Value - runtime values that patterns are matched against.
//!
//! This crate provides:
//! - The dynamic [`Value`] type (primitives, arrays, objects, callables, iterators)
//! - [`Key`], the property/binding key shared by objects and arrays
//! - Stateful pull iterators with an explicit close capability
//! - ECMAScript `SameValue` equality (`same_value`)
//!
//! # Identity
//!
//! Reference values (arrays, objects, functions, iterators) live behind
//! [`Heap`], an `Arc` wrapper. Cloning a `Value` shares the allocation, and
//! [`Value::identity`] exposes the allocation address as an [`Identity`]
//! token. Two values have the same identity exactly when they are clones of
//! one another.
//!
//! # Thread Safety
//!
//! Values are `Send + Sync`. Iterator state sits behind a
//! `parking_lot::Mutex`; accessor and native closures must be `Send + Sync`.

pub mod ecma;
mod value;

pub use ecma::same_value;
pub use value::{
    number_to_string, FunctionValue, GetterFn, Heap, Identity, IterStep, IteratorValue, Key,
    NativeFn, ObjectBuilder, ObjectValue, Property, Value,
};

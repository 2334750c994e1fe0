//! ECMAScript `SameValue` equality.

use crate::value::{Heap, Value};

/// `SameValue(x, y)`: strict equality, except `NaN` equals `NaN` and `+0`
/// differs from `-0`. Reference values compare by identity.
#[allow(
    clippy::float_cmp,
    reason = "bitwise float comparison is the definition of SameValue"
)]
pub fn same_value(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => {
            if a.is_nan() && b.is_nan() {
                return true;
            }
            a.to_bits() == b.to_bits()
        }
        (Value::BigInt(a), Value::BigInt(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => **a == **b,
        (Value::Array(a), Value::Array(b)) => Heap::ptr_eq(a, b),
        (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
        (Value::Function(a), Value::Function(b)) => Heap::ptr_eq(a, b),
        (Value::Iterator(a), Value::Iterator(b)) => Heap::ptr_eq(a, b),
        _ => false,
    }
}

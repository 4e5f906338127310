//! Structural equality comparator.
//!
//! Dirty tracking compares the edit buffer against the last committed
//! snapshot by *structure*, not by identity. Both sides are lowered to
//! `serde_json::Value` and compared with the rules below:
//!
//! - Scalars (`null`, booleans, numbers, strings) compare by value.
//! - Arrays whose elements are all scalars compare as **multisets**: both
//!   copies are sorted independently and then compared element-wise, so
//!   `["a", "b"]` equals `["b", "a"]`.
//! - Arrays containing at least one structured element (object or array)
//!   compare as **sequences**: equal length and recursively equal at every
//!   index. Sorting structured elements would change their meaning.
//! - Objects are equal when both carry the same key set and every value is
//!   recursively equal. Key order does not matter.
//!
//! The data model is acyclic, so there is no cycle detection. Recursion is
//! capped at [`MAX_DEPTH`]; anything deeper compares unequal.

use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

/// Maximum nesting depth the comparator descends into.
pub const MAX_DEPTH: usize = 64;

/// Returns `true` when `a` and `b` are structurally equivalent.
///
/// # Examples
///
/// ```
/// use motif_core::equality::structural_eq;
/// use serde_json::json;
///
/// // Scalar arrays are order-insensitive
/// assert!(structural_eq(&json!(["s1", "s2"]), &json!(["s2", "s1"])));
///
/// // Arrays of objects are order-sensitive
/// assert!(!structural_eq(
///     &json!([{ "id": 1 }, { "id": 2 }]),
///     &json!([{ "id": 2 }, { "id": 1 }]),
/// ));
/// ```
pub fn structural_eq(a: &Value, b: &Value) -> bool {
    eq_at_depth(a, b, 0)
}

fn eq_at_depth(a: &Value, b: &Value, depth: usize) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if depth > MAX_DEPTH {
        return false;
    }

    match (a, b) {
        (Value::Array(left), Value::Array(right)) => arrays_eq(left, right, depth),
        (Value::Object(left), Value::Object(right)) => objects_eq(left, right, depth),
        (Value::Number(left), Value::Number(right)) => numbers_eq(left, right),
        _ => a == b,
    }
}

fn arrays_eq(left: &[Value], right: &[Value], depth: usize) -> bool {
    if left.len() != right.len() {
        return false;
    }

    if left.iter().chain(right.iter()).all(is_scalar) {
        let mut left_sorted: Vec<&Value> = left.iter().collect();
        let mut right_sorted: Vec<&Value> = right.iter().collect();
        left_sorted.sort_by(|x, y| cmp_scalars(x, y));
        right_sorted.sort_by(|x, y| cmp_scalars(x, y));
        return left_sorted
            .iter()
            .zip(right_sorted.iter())
            .all(|(x, y)| eq_at_depth(x, y, depth + 1));
    }

    left.iter()
        .zip(right.iter())
        .all(|(x, y)| eq_at_depth(x, y, depth + 1))
}

fn objects_eq(left: &Map<String, Value>, right: &Map<String, Value>, depth: usize) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter().all(|(key, value)| {
        right
            .get(key)
            .is_some_and(|other| eq_at_depth(value, other, depth + 1))
    })
}

// `1` and `1.0` are the same number to the callers that produce these values.
fn numbers_eq(left: &Number, right: &Number) -> bool {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l == r;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) | Value::Object(_) => 4,
    }
}

/// Total order over scalars used only to canonicalize multisets.
fn cmp_scalars(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => scalar_rank(a).cmp(&scalar_rank(b)),
    }
}

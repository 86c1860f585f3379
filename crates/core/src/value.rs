//! Comparison and equality over record values.
//!
//! Records are schema-less, so values of any JSON kind can meet in a sort or a
//! predicate. This module defines the single total order and the strict
//! equality used everywhere else in the workspace.

use core::cmp::Ordering;
use serde_json::{Number, Value};

/// Returns the rank of a value's kind in the cross-kind order.
///
/// `null < bool < number < string < array < object`. Absence is ranked below
/// all of them by [`compare_optional`].
fn type_order(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Returns a static name for the kind of a value.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Compares two JSON numbers numerically.
///
/// Integers are compared exactly; anything involving a float goes through f64.
pub fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    let x = a.as_f64().unwrap_or(0.0);
    let y = b.as_f64().unwrap_or(0.0);
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}

/// Total order over present values.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y.iter()) {
                let ord = compare_values(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        _ => type_order(a).cmp(&type_order(b)),
    }
}

/// Total order over possibly-absent values; absence sorts lowest.
pub fn compare_optional(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => compare_values(x, y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Strict equality between two present values.
///
/// Numbers are equal when numerically equal (`1 == 1.0`); values of different
/// kinds are never equal.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Ordering::Equal,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| strict_eq(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).map(|w| strict_eq(v, w)).unwrap_or(false))
        }
        _ => a == b,
    }
}

/// Strict equality where either side may be absent. Two absences are equal.
pub fn strict_eq_optional(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => strict_eq(x, y),
        (None, None) => true,
        _ => false,
    }
}

/// Renders a value the way it appears inside a composed key or a text match.
///
/// Null and absence render as empty text; integral floats render without a
/// fractional part so `1.0` and `1` produce the same text.
pub fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => display_number(n),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| display_text(Some(v)))
            .collect::<Vec<_>>()
            .join(","),
        Some(v @ Value::Object(_)) => v.to_string(),
    }
}

fn display_number(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

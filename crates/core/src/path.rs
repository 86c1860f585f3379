//! Attribute traversal.
//!
//! A path is either a flat attribute name or a dot-separated chain. The flat
//! name always wins: an attribute literally named `"a.b"` is found before the
//! path is split. Missing levels resolve to `None`, never to an error.

use serde_json::{Map, Value};

/// Resolves `path` against the fields of a record.
///
/// ```
/// use recollect_core::path::resolve;
/// use serde_json::json;
///
/// let record = json!({"a": 1, "b": {"x": 1, "y": 2}, "c.d": 3});
/// let map = record.as_object().unwrap();
/// assert_eq!(resolve(map, "b.y"), Some(&json!(2)));
/// assert_eq!(resolve(map, "c.d"), Some(&json!(3)));
/// assert_eq!(resolve(map, "b.z"), None);
/// ```
pub fn resolve<'a>(fields: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = fields.get(path) {
        return Some(value);
    }
    if !path.contains('.') {
        return None;
    }

    let mut segments = path.split('.');
    let first = segments.next().filter(|s| !s.is_empty())?;
    let mut current = fields.get(first)?;
    for segment in segments {
        current = step(current, segment)?;
    }
    Some(current)
}

/// Resolves `path` against an arbitrary value.
///
/// Non-object values only resolve through array indexing.
pub fn resolve_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    match value {
        Value::Object(fields) => resolve(fields, path),
        _ => path.split('.').try_fold(value, step),
    }
}

/// Returns the last dotted segment of a path.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    if segment.is_empty() {
        return None;
    }
    match value {
        Value::Object(fields) => fields.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

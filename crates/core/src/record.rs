//! Record handle.
//!
//! A `Record` is a shared handle to a schema-less map of fields. Collections,
//! views and proxies hold handles, never copies: cloning a `Record` clones the
//! handle, and a field written through one handle is visible through every
//! other handle to the same record.

use crate::error::{Error, Result};
use crate::path;
use crate::value::kind_name;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;
use serde_json::{Map, Value};
use std::rc::Rc;

/// A shared, mutable, schema-less record.
///
/// Equality is identity: two `Record`s are equal only when they are handles
/// to the same underlying record.
#[derive(Clone, Default)]
pub struct Record {
    fields: Rc<RefCell<Map<String, Value>>>,
}

impl Record {
    /// Creates a record from a map of fields.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields: Rc::new(RefCell::new(fields)),
        }
    }

    /// Resolves a (possibly dotted) path and returns a copy of the value.
    pub fn get(&self, path: &str) -> Option<Value> {
        path::resolve(&self.fields.borrow(), path).cloned()
    }

    /// Resolves a path and hands the borrowed value to `f`, avoiding a copy.
    ///
    /// The record is borrowed for the duration of `f`; `f` must not write to
    /// this same record.
    pub fn with_value<R>(&self, path: &str, f: impl FnOnce(Option<&Value>) -> R) -> R {
        let fields = self.fields.borrow();
        f(path::resolve(&fields, path))
    }

    /// Returns true if the path resolves to a value (including `null`).
    pub fn has(&self, path: &str) -> bool {
        path::resolve(&self.fields.borrow(), path).is_some()
    }

    /// Sets a top-level field in place, returning the previous value.
    ///
    /// Changing a primary key field of a record that is already stored does
    /// not re-index it; re-add the record instead.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.borrow_mut().insert(key.into(), value.into())
    }

    /// Removes a top-level field in place.
    pub fn unset(&self, key: &str) -> Option<Value> {
        self.fields.borrow_mut().remove(key)
    }

    /// Borrows the fields.
    pub fn fields(&self) -> Ref<'_, Map<String, Value>> {
        self.fields.borrow()
    }

    /// Mutably borrows the fields.
    pub fn fields_mut(&self) -> RefMut<'_, Map<String, Value>> {
        self.fields.borrow_mut()
    }

    /// Returns a detached JSON copy of the record.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.borrow().clone())
    }

    /// Returns true if both handles point at the same record.
    #[inline]
    pub fn ptr_eq(&self, other: &Record) -> bool {
        Rc::ptr_eq(&self.fields, &other.fields)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Record {}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fields.try_borrow() {
            Ok(fields) => write!(f, "Record({})", Value::Object(fields.clone())),
            Err(_) => f.write_str("Record(<borrowed>)"),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Record::new(fields)
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Record::new(fields)),
            other => Err(Error::not_an_object(kind_name(&other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[test]
    fn test_record_get_nested() {
        let r = record(json!({"id": 1, "job": {"title": "engineer"}}));
        assert_eq!(r.get("id"), Some(json!(1)));
        assert_eq!(r.get("job.title"), Some(json!("engineer")));
        assert_eq!(r.get("job.salary"), None);
        assert!(r.has("job"));
    }

    #[test]
    fn test_record_identity() {
        let a = record(json!({"id": 1}));
        let b = record(json!({"id": 1}));
        let a2 = a.clone();
        assert_eq!(a, a2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_mutation_is_shared() {
        let a = record(json!({"id": 1, "age": 20}));
        let alias = a.clone();
        a.set("age", 21);
        assert_eq!(alias.get("age"), Some(json!(21)));
        assert_eq!(alias.unset("age"), Some(json!(21)));
        assert!(!a.has("age"));
    }

    #[test]
    fn test_record_rejects_non_objects() {
        let err = Record::try_from(json!([1, 2])).unwrap_err();
        assert_eq!(err, Error::not_an_object("array"));
    }

    #[test]
    fn test_record_with_value() {
        let r = record(json!({"name": "tim"}));
        let len = r.with_value("name", |v| v.and_then(Value::as_str).map(str::len));
        assert_eq!(len, Some(3));
    }
}

//! What `remove` and `keep` act on.

use core::fmt;
use hashbrown::HashSet;
use recollect_core::{IndexKey, Matcher, PkSpec, Record, Value};
use std::rc::Rc;

/// Predicate over a whole record.
pub type RecordPredicate = Rc<dyn Fn(&Record) -> bool>;

/// Selects the records a removal applies to.
///
/// ```
/// use recollect_core::{contains, json, Record};
/// use recollect_storage::RemoveSelector;
///
/// let by_key = RemoveSelector::key(3);
/// let by_keys = RemoveSelector::keys([json!(1), json!(3)]);
/// let by_attribute = RemoveSelector::from(("last_name", contains("^do")));
/// let by_predicate = RemoveSelector::predicate(|r: &Record| r.has("age"));
/// ```
#[derive(Clone)]
pub enum RemoveSelector {
    /// Primary key values. A composed key is an array of its components.
    ///
    /// An array given where one key is expected is read as a list of keys:
    /// `[1, 3]` on a single key, `[[1, "x"], [3, "z"]]` on a composed one.
    ByKey(Vec<Value>),
    /// Records, located by their primary key.
    ByRecord(Vec<Record>),
    /// Records whose attribute satisfies the matcher.
    ByAttribute(String, Matcher),
    /// Records satisfying an arbitrary predicate.
    ByPredicate(RecordPredicate),
}

impl RemoveSelector {
    /// Selects one primary key value.
    pub fn key(value: impl Into<Value>) -> Self {
        RemoveSelector::ByKey(vec![value.into()])
    }

    /// Selects several primary key values.
    pub fn keys<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        RemoveSelector::ByKey(values.into_iter().map(Into::into).collect())
    }

    /// Selects one record.
    pub fn record(record: &Record) -> Self {
        RemoveSelector::ByRecord(vec![record.clone()])
    }

    /// Selects several records.
    pub fn records(records: impl IntoIterator<Item = Record>) -> Self {
        RemoveSelector::ByRecord(records.into_iter().collect())
    }

    /// Selects by attribute.
    pub fn attribute(path: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        RemoveSelector::ByAttribute(path.into(), matcher.into())
    }

    /// Selects by predicate.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Record) -> bool + 'static,
    {
        RemoveSelector::ByPredicate(Rc::new(f))
    }

    /// Resolves the selector against a key specification.
    ///
    /// Key values, records and literal matchers on the single key attribute
    /// all become index key lookups.
    pub(crate) fn resolve(&self, pk: &PkSpec) -> ResolvedSelector {
        match self {
            RemoveSelector::ByKey(values) => ResolvedSelector::Keys(
                values
                    .iter()
                    .flat_map(|v| key_list(pk, v))
                    .map(|v| pk.key_for(v))
                    .collect(),
            ),
            RemoveSelector::ByRecord(records) => {
                ResolvedSelector::Keys(records.iter().map(|r| pk.index_key(r)).collect())
            }
            RemoveSelector::ByAttribute(path, matcher) if pk.is_key_attribute(path) => {
                match matcher {
                    Matcher::Value(v) => ResolvedSelector::Keys([pk.key_for(v)].into_iter().collect()),
                    Matcher::OneOf(vs) => {
                        ResolvedSelector::Keys(vs.iter().map(|v| pk.key_for(v)).collect())
                    }
                    Matcher::Predicate(_) => {
                        ResolvedSelector::Attribute(path.clone(), matcher.clone())
                    }
                }
            }
            RemoveSelector::ByAttribute(path, matcher) => {
                ResolvedSelector::Attribute(path.clone(), matcher.clone())
            }
            RemoveSelector::ByPredicate(f) => ResolvedSelector::Predicate(f.clone()),
        }
    }
}

/// Splits a key value into the primary key values it stands for.
///
/// An array is a list of keys on a single key, and a list of composed keys
/// when every element is itself an array. A flat array on a composed key is
/// one key.
fn key_list<'a>(pk: &PkSpec, value: &'a Value) -> Vec<&'a Value> {
    match value {
        Value::Array(items) if !pk.is_composed() || items.iter().all(Value::is_array) => {
            items.iter().collect()
        }
        other => vec![other],
    }
}

impl fmt::Debug for RemoveSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveSelector::ByKey(keys) => f.debug_tuple("ByKey").field(keys).finish(),
            RemoveSelector::ByRecord(records) => f.debug_tuple("ByRecord").field(records).finish(),
            RemoveSelector::ByAttribute(path, matcher) => {
                f.debug_tuple("ByAttribute").field(path).field(matcher).finish()
            }
            RemoveSelector::ByPredicate(_) => f.write_str("ByPredicate(..)"),
        }
    }
}

impl From<Record> for RemoveSelector {
    fn from(record: Record) -> Self {
        RemoveSelector::ByRecord(vec![record])
    }
}

impl From<&Record> for RemoveSelector {
    fn from(record: &Record) -> Self {
        RemoveSelector::record(record)
    }
}

impl From<Vec<Record>> for RemoveSelector {
    fn from(records: Vec<Record>) -> Self {
        RemoveSelector::ByRecord(records)
    }
}

impl From<Value> for RemoveSelector {
    fn from(value: Value) -> Self {
        RemoveSelector::ByKey(vec![value])
    }
}

impl From<i64> for RemoveSelector {
    fn from(value: i64) -> Self {
        RemoveSelector::key(value)
    }
}

impl From<i32> for RemoveSelector {
    fn from(value: i32) -> Self {
        RemoveSelector::key(value)
    }
}

impl From<&str> for RemoveSelector {
    fn from(value: &str) -> Self {
        RemoveSelector::key(value)
    }
}

impl<P, M> From<(P, M)> for RemoveSelector
where
    P: Into<String>,
    M: Into<Matcher>,
{
    fn from((path, matcher): (P, M)) -> Self {
        RemoveSelector::attribute(path, matcher)
    }
}

/// A selector bound to a key specification.
pub(crate) enum ResolvedSelector {
    Keys(HashSet<IndexKey>),
    Attribute(String, Matcher),
    Predicate(RecordPredicate),
}

impl ResolvedSelector {
    /// Tests a stored entry.
    pub(crate) fn matches(&self, key: &IndexKey, record: &Record) -> bool {
        match self {
            ResolvedSelector::Keys(keys) => keys.contains(key),
            ResolvedSelector::Attribute(path, matcher) => {
                record.with_value(path, |value| matcher.test(value))
            }
            ResolvedSelector::Predicate(f) => f(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recollect_core::{contains, json};

    fn tim() -> Record {
        Record::try_from(json!({"id": 3, "first_name": "tim", "last_name": "doe"})).unwrap()
    }

    #[test]
    fn test_key_resolves_to_index_key() {
        let pk = PkSpec::default();
        let resolved = RemoveSelector::key(3).resolve(&pk);
        assert!(resolved.matches(&IndexKey::Int(3), &tim()));
        assert!(!resolved.matches(&IndexKey::Int(1), &tim()));
    }

    #[test]
    fn test_composed_key() {
        let pk = PkSpec::from(["first_name", "last_name"]);
        let t = tim();
        let resolved = RemoveSelector::key(json!(["tim", "doe"])).resolve(&pk);
        assert!(resolved.matches(&pk.index_key(&t), &t));
    }

    #[test]
    fn test_record_resolves_by_key() {
        let pk = PkSpec::default();
        let other = Record::try_from(json!({"id": 3})).unwrap();
        let resolved = RemoveSelector::from(&other).resolve(&pk);
        assert!(resolved.matches(&IndexKey::Int(3), &tim()));
    }

    #[test]
    fn test_key_attribute_uses_index() {
        let pk = PkSpec::default();
        let resolved = RemoveSelector::from(("id", json!([1, 3]))).resolve(&pk);
        assert!(matches!(resolved, ResolvedSelector::Keys(ref keys) if keys.len() == 2));
    }

    #[test]
    fn test_attribute_and_predicate() {
        let pk = PkSpec::default();
        let t = tim();
        let key = pk.index_key(&t);

        let by_attr = RemoveSelector::from(("last_name", contains("^do"))).resolve(&pk);
        assert!(by_attr.matches(&key, &t));

        let by_pred = RemoveSelector::predicate(|r: &Record| r.has("age")).resolve(&pk);
        assert!(!by_pred.matches(&key, &t));
    }

    #[test]
    fn test_key_array_is_a_list_of_keys() {
        let pk = PkSpec::default();
        let t = tim();
        let resolved = RemoveSelector::from(json!([1, 3])).resolve(&pk);
        assert!(resolved.matches(&IndexKey::Int(3), &t));
        assert!(resolved.matches(&IndexKey::Int(1), &t));
        assert!(!resolved.matches(&IndexKey::Int(2), &t));
    }

    #[test]
    fn test_composed_key_list() {
        let pk = PkSpec::from(["first_name", "last_name"]);
        let t = tim();
        let key = pk.index_key(&t);

        let list = RemoveSelector::from(json!([["john", "redford"], ["tim", "doe"]])).resolve(&pk);
        assert!(matches!(list, ResolvedSelector::Keys(ref keys) if keys.len() == 2));
        assert!(list.matches(&key, &t));

        let single = RemoveSelector::from(json!(["tim", "doe"])).resolve(&pk);
        assert!(single.matches(&key, &t));
    }
}

//! Relational trimming across several collections.
//!
//! `join` never touches its inputs. It works on duplicates:
//!
//! 1. every `where` clause filters the collection it is qualified with
//! 2. relations run in order; each keeps only the right-hand records whose
//!    attribute value appears among the left-hand values
//!
//! Each relation sees the left side as already trimmed by the relations
//! before it, so constraints propagate along the relation list and the
//! result can depend on its order when relations form a cycle.

use crate::relation::{QualifiedAttribute, Relation};
use hashbrown::{HashMap, HashSet};
use recollect_core::value::strict_eq;
use recollect_core::{Error, IndexKey, Result, Selection, Value};
use recollect_storage::{Collection, ReadCollection, RemoveSelector};

/// Values read from the left side of a relation.
///
/// Scalars and absence are hashed through the key codec; arrays and objects
/// fall back to a strict equality scan.
struct ValueSet {
    scalars: HashSet<IndexKey>,
    compound: Vec<Value>,
}

impl ValueSet {
    fn new(values: Vec<Option<Value>>) -> Self {
        let mut scalars = HashSet::new();
        let mut compound = Vec::new();
        for value in values {
            match value {
                Some(v @ (Value::Array(_) | Value::Object(_))) => compound.push(v),
                other => {
                    scalars.insert(IndexKey::from_value(other.as_ref()));
                }
            }
        }
        Self { scalars, compound }
    }

    fn contains(&self, value: Option<&Value>) -> bool {
        match value {
            Some(v @ (Value::Array(_) | Value::Object(_))) => {
                self.compound.iter().any(|c| strict_eq(c, v))
            }
            other => self.scalars.contains(&IndexKey::from_value(other)),
        }
    }
}

/// Looks a collection up by name, failing with `UnknownCollection`.
fn require<'a>(
    collections: &'a HashMap<String, Collection>,
    name: &str,
) -> Result<&'a Collection> {
    collections.get(name).ok_or_else(|| {
        tracing::warn!(collection = name, "join references an unknown collection");
        Error::unknown_collection(name)
    })
}

fn parse(reference: &str) -> Result<QualifiedAttribute> {
    QualifiedAttribute::parse(reference).map_err(|err| {
        tracing::warn!(reference, "join reference is not collection.attribute");
        err
    })
}

/// Joins and trims `collections` according to `relations` and `where_`.
///
/// `where_` holds qualified paths (`"addresses.city"`). Every reference is
/// validated before any work is done. The result holds one trimmed duplicate
/// per input collection.
///
/// ```
/// use recollect_core::{json, Record, Selection};
/// use recollect_query::{join, HashMap, Relation};
/// use recollect_storage::{Collection, ReadCollection};
///
/// let record = |v| Record::try_from(v).unwrap();
/// let mut tables = HashMap::new();
/// tables.insert("jobs".to_string(), Collection::from_records(
///     [record(json!({"id": 1, "title": "engineer"})), record(json!({"id": 2, "title": "technician"}))],
///     "id",
/// ));
/// tables.insert("users".to_string(), Collection::from_records(
///     [record(json!({"id": 3, "job_id": 1, "age": 55})), record(json!({"id": 2, "job_id": 2, "age": 16}))],
///     "id",
/// ));
///
/// let joined = join(
///     &tables,
///     &[Relation::new("users.job_id", "jobs.id")],
///     &Selection::new().with("users.age", recollect_core::min(21)),
/// )
/// .unwrap();
/// assert_eq!(joined["jobs"].select("title"), vec![json!("engineer")]);
/// assert_eq!(tables["jobs"].size(), 2);
/// ```
pub fn join(
    collections: &HashMap<String, Collection>,
    relations: &[Relation],
    where_: &Selection,
) -> Result<HashMap<String, Collection>> {
    // Group where clauses per collection, in first-appearance order.
    let mut filters: Vec<(String, Selection)> = Vec::new();
    for (path, matcher) in where_.clauses() {
        let target = parse(path)?;
        require(collections, &target.collection)?;
        match filters.iter_mut().find(|(name, _)| *name == target.collection) {
            Some((_, selection)) => selection.push(target.attribute, matcher.clone()),
            None => filters.push((
                target.collection,
                Selection::new().with(target.attribute, matcher.clone()),
            )),
        }
    }

    let mut steps = Vec::with_capacity(relations.len());
    for relation in relations {
        let (left, right) = relation.parse().map_err(|err| {
            tracing::warn!(left = %relation.left, right = %relation.right, "invalid join relation");
            err
        })?;
        require(collections, &left.collection)?;
        require(collections, &right.collection)?;
        steps.push((left, right));
    }

    let mut result: HashMap<String, Collection> = collections
        .iter()
        .map(|(name, collection)| (name.clone(), collection.duplicate()))
        .collect();

    for (name, selection) in &filters {
        if let Some(collection) = result.get_mut(name) {
            *collection = collection.where_(selection);
            tracing::debug!(collection = %name, size = collection.size(), "join where");
        }
    }

    for (left, right) in steps {
        let values = match result.get(&left.collection) {
            Some(collection) => ValueSet::new(collection.pluck(&left.attribute)),
            None => continue,
        };
        if let Some(collection) = result.get(&right.collection) {
            let attribute = right.attribute.clone();
            collection.keep_silent(RemoveSelector::predicate(move |record| {
                record.with_value(&attribute, |value| values.contains(value))
            }));
            tracing::debug!(
                left = %left,
                right = %right,
                size = collection.size(),
                "join trim"
            );
        }
    }

    Ok(result)
}

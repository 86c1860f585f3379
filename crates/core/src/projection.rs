//! Attribute projection for `select`.

use crate::key::PkSpec;
use crate::path::last_segment;
use crate::record::Record;
use core::fmt;
use serde_json::{Map, Value};
use std::rc::Rc;

/// Computes an output value from a whole record.
pub type ComputeFn = Rc<dyn Fn(&Record) -> Value>;

/// One output field of a [`Projection::Map`].
#[derive(Clone)]
pub enum Field {
    /// The value found at a (possibly dotted) path.
    Path(String),
    /// The result of a function over the record.
    Compute(ComputeFn),
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Field::Compute(_) => f.write_str("Compute(..)"),
        }
    }
}

/// What `select` extracts from each record.
#[derive(Clone, Debug)]
pub enum Projection {
    /// A flat list of the values at one path; absence renders as `null`.
    Path(String),
    /// One object per record, keyed by each path's last segment.
    Paths(Vec<String>),
    /// One object per record with caller-chosen output keys.
    Map(Vec<(String, Field)>),
    /// The primary key: the value itself, or the ordered components of a
    /// composed key.
    Key,
}

impl Projection {
    /// Starts an empty mapping projection.
    pub fn map() -> Self {
        Projection::Map(Vec::new())
    }

    /// Adds `output <- path` to a mapping projection.
    ///
    /// Has no effect on the other variants.
    pub fn field(mut self, output: impl Into<String>, path: impl Into<String>) -> Self {
        if let Projection::Map(fields) = &mut self {
            fields.push((output.into(), Field::Path(path.into())));
        }
        self
    }

    /// Adds `output <- f(record)` to a mapping projection.
    ///
    /// Has no effect on the other variants.
    pub fn compute<F>(mut self, output: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Record) -> Value + 'static,
    {
        if let Projection::Map(fields) = &mut self {
            fields.push((output.into(), Field::Compute(Rc::new(f))));
        }
        self
    }

    /// Projects one record.
    pub fn project(&self, record: &Record, pk: &PkSpec) -> Value {
        match self {
            Projection::Path(path) => record.get(path).unwrap_or(Value::Null),
            Projection::Paths(paths) => {
                let mut out = Map::new();
                for path in paths {
                    if let Some(value) = record.get(path) {
                        out.insert(last_segment(path).to_string(), value);
                    }
                }
                Value::Object(out)
            }
            Projection::Map(fields) => {
                let mut out = Map::new();
                for (output, field) in fields {
                    let value = match field {
                        Field::Path(path) => record.get(path),
                        Field::Compute(f) => Some(f(record)),
                    };
                    if let Some(value) = value {
                        out.insert(output.clone(), value);
                    }
                }
                Value::Object(out)
            }
            Projection::Key => pk.values_of(record).to_json(),
        }
    }
}

impl From<&str> for Projection {
    fn from(path: &str) -> Self {
        Projection::Path(path.into())
    }
}

impl From<String> for Projection {
    fn from(path: String) -> Self {
        Projection::Path(path)
    }
}

impl From<Vec<&str>> for Projection {
    fn from(paths: Vec<&str>) -> Self {
        Projection::Paths(paths.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Projection {
    fn from(paths: [&str; N]) -> Self {
        Projection::Paths(paths.iter().map(|p| String::from(*p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn john() -> Record {
        Record::try_from(json!({
            "id": 1,
            "first_name": "john",
            "last_name": "redford",
            "job": {"title": "engineer"}
        }))
        .unwrap()
    }

    #[test]
    fn test_project_path() {
        let pk = PkSpec::default();
        assert_eq!(Projection::from("id").project(&john(), &pk), json!(1));
        assert_eq!(Projection::from("job.title").project(&john(), &pk), json!("engineer"));
        assert_eq!(Projection::from("age").project(&john(), &pk), Value::Null);
    }

    #[test]
    fn test_project_paths() {
        let pk = PkSpec::default();
        let out = Projection::from(["first_name", "job.title", "age"]).project(&john(), &pk);
        assert_eq!(out, json!({"first_name": "john", "title": "engineer"}));
    }

    #[test]
    fn test_project_map() {
        let pk = PkSpec::default();
        let projection = Projection::map()
            .field("name", "first_name")
            .compute("full", |r| {
                let first = r.get("first_name").unwrap_or(Value::Null);
                let last = r.get("last_name").unwrap_or(Value::Null);
                json!(format!(
                    "{} {}",
                    first.as_str().unwrap_or(""),
                    last.as_str().unwrap_or("")
                ))
            });
        assert_eq!(
            projection.project(&john(), &pk),
            json!({"name": "john", "full": "john redford"})
        );
    }

    #[test]
    fn test_project_key() {
        assert_eq!(Projection::Key.project(&john(), &PkSpec::default()), json!(1));
        let composed = PkSpec::from(["last_name", "id"]);
        assert_eq!(Projection::Key.project(&john(), &composed), json!(["redford", 1]));
    }

    #[test]
    fn test_builder_ignored_on_other_variants() {
        let p = Projection::from("id").field("x", "y");
        assert!(matches!(p, Projection::Path(_)));
    }
}

//! Key codec.
//!
//! Turns the primary key value(s) of a record into an [`IndexKey`]. A simple
//! primary key keeps the value itself (type preserved, so `1` and `"1"` are
//! different identities). A composed primary key joins the text of each
//! component with the ASCII unit separator.
//!
//! A component that itself contains the separator can collide with another
//! key. This is an accepted limitation; components are not escaped.

use crate::record::Record;
use crate::value::display_text;
use serde_json::{Number, Value};

/// Separator placed between the components of a composed key (ASCII 0x1F).
pub const DELIMITER: char = '\u{1f}';

/// Canonical, hashable and ordered form of a primary key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexKey {
    /// The key attribute is missing from the record.
    Absent,
    Null,
    Bool(bool),
    /// Integral numbers, including integral floats.
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    /// Non-integral floats, by bit pattern.
    Float(u64),
    Str(String),
    /// A composed key: component texts joined by [`DELIMITER`].
    Composite(String),
    /// Arrays and objects used as a simple key, by their JSON text.
    Json(String),
}

impl IndexKey {
    /// Builds the key for a single, possibly absent, value.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => IndexKey::Absent,
            Some(Value::Null) => IndexKey::Null,
            Some(Value::Bool(b)) => IndexKey::Bool(*b),
            Some(Value::Number(n)) => Self::from_number(n),
            Some(Value::String(s)) => IndexKey::Str(s.clone()),
            Some(other) => IndexKey::Json(other.to_string()),
        }
    }

    /// Builds a composed key from ordered components.
    pub fn composite<'a>(components: impl IntoIterator<Item = Option<&'a Value>>) -> Self {
        let parts: Vec<String> = components.into_iter().map(display_text).collect();
        IndexKey::Composite(parts.join(&DELIMITER.to_string()))
    }

    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return IndexKey::Int(i);
        }
        if let Some(u) = n.as_u64() {
            return IndexKey::UInt(u);
        }
        let f = n.as_f64().unwrap_or(0.0);
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            IndexKey::Int(f as i64)
        } else {
            IndexKey::Float(f.to_bits())
        }
    }
}

/// Raw primary key component(s) extracted from a record.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyValues {
    Single(Option<Value>),
    /// Components in declared order.
    Composed(Vec<Option<Value>>),
}

impl KeyValues {
    /// Encodes the values into their canonical index key.
    pub fn encode(&self) -> IndexKey {
        match self {
            KeyValues::Single(value) => IndexKey::from_value(value.as_ref()),
            KeyValues::Composed(values) => IndexKey::composite(values.iter().map(Option::as_ref)),
        }
    }

    /// Returns the values as JSON: the scalar itself, or an array of components.
    ///
    /// Absent components become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            KeyValues::Single(value) => value.clone().unwrap_or(Value::Null),
            KeyValues::Composed(values) => Value::Array(
                values
                    .iter()
                    .map(|v| v.clone().unwrap_or(Value::Null))
                    .collect(),
            ),
        }
    }
}

/// Primary key specification, fixed when a collection is created.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PkSpec {
    /// A single attribute name.
    Single(String),
    /// An ordered list of attribute names.
    Composed(Vec<String>),
}

impl Default for PkSpec {
    fn default() -> Self {
        PkSpec::Single("id".into())
    }
}

impl PkSpec {
    /// Returns true for a multi-attribute key.
    #[inline]
    pub fn is_composed(&self) -> bool {
        matches!(self, PkSpec::Composed(_))
    }

    /// Returns the key attribute names in declared order.
    pub fn attributes(&self) -> Vec<&str> {
        match self {
            PkSpec::Single(name) => vec![name.as_str()],
            PkSpec::Composed(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Returns true if `attribute` is the (single) key attribute.
    pub fn is_key_attribute(&self, attribute: &str) -> bool {
        matches!(self, PkSpec::Single(name) if name == attribute)
    }

    /// Extracts the key component(s) from a record.
    pub fn values_of(&self, record: &Record) -> KeyValues {
        match self {
            PkSpec::Single(name) => KeyValues::Single(record.get(name)),
            PkSpec::Composed(names) => {
                KeyValues::Composed(names.iter().map(|name| record.get(name)).collect())
            }
        }
    }

    /// Encodes already extracted key values.
    #[inline]
    pub fn encode(&self, values: &KeyValues) -> IndexKey {
        values.encode()
    }

    /// Returns the index key of a record.
    pub fn index_key(&self, record: &Record) -> IndexKey {
        match self {
            PkSpec::Single(name) => record.with_value(name, IndexKey::from_value),
            PkSpec::Composed(_) => self.values_of(record).encode(),
        }
    }

    /// Returns the index key for a raw key value supplied by a caller.
    ///
    /// For a composed key the value is an array of components; any other value
    /// is taken as a single component.
    pub fn key_for(&self, value: &Value) -> IndexKey {
        match (self, value) {
            (PkSpec::Single(_), v) => IndexKey::from_value(Some(v)),
            (PkSpec::Composed(_), Value::Array(items)) => IndexKey::composite(items.iter().map(Some)),
            (PkSpec::Composed(_), v) => IndexKey::composite([Some(v)]),
        }
    }
}

impl From<&str> for PkSpec {
    fn from(name: &str) -> Self {
        PkSpec::Single(name.into())
    }
}

impl From<String> for PkSpec {
    fn from(name: String) -> Self {
        PkSpec::Single(name)
    }
}

impl From<Vec<String>> for PkSpec {
    fn from(names: Vec<String>) -> Self {
        PkSpec::Composed(names)
    }
}

impl From<Vec<&str>> for PkSpec {
    fn from(names: Vec<&str>) -> Self {
        PkSpec::Composed(names.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PkSpec {
    fn from(names: [&str; N]) -> Self {
        PkSpec::Composed(names.iter().map(|n| String::from(*n)).collect())
    }
}

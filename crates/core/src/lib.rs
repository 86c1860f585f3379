//! Recollect Core - records, keys and predicates for the recollect store.
//!
//! This crate provides the leaf components every other recollect crate builds on:
//!
//! - `Record`: a shared handle to a schema-less map of fields
//! - `PkSpec` / `IndexKey`: the key codec turning primary key values into index keys
//! - `path`: nested attribute traversal (`"address.city"`)
//! - `value`: the total order and strict equality over record values
//! - `Matcher` / `Selection`: the predicate evaluator and its combinators
//! - `Projection`: attribute projection used by `select`
//! - `Error`: usage errors surfaced at API boundaries
//!
//! # Example
//!
//! ```rust
//! use recollect_core::{matcher, PkSpec, Record, Selection};
//! use serde_json::json;
//!
//! let tim = Record::try_from(json!({
//!     "id": 3,
//!     "first_name": "tim",
//!     "address": {"city": "Los Angeles"},
//!     "age": 55
//! }))
//! .unwrap();
//!
//! assert_eq!(tim.get("address.city"), Some(json!("Los Angeles")));
//!
//! let adults_in_la = Selection::new()
//!     .with("address.city", "Los Angeles")
//!     .with("age", matcher::min(21));
//! assert!(adults_in_la.matches(&tim));
//!
//! let pk = PkSpec::from(["first_name", "id"]);
//! assert_eq!(pk.values_of(&tim).to_json(), json!(["tim", 3]));
//! ```

mod error;
mod id;
pub mod key;
pub mod matcher;
pub mod path;
pub mod projection;
mod record;
pub mod selection;
pub mod value;

pub use error::{Error, Result};
pub use id::uuid;
pub use key::{IndexKey, KeyValues, PkSpec, DELIMITER};
pub use matcher::{contains, fuzzy, max, min, within, Matcher, ValuePredicate};
pub use projection::{ComputeFn, Field, Projection};
pub use record::Record;
pub use selection::Selection;

// Re-export the value type so downstream crates agree on one serde_json.
pub use serde_json::{json, Map, Value};

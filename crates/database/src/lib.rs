//! Recollect - an in-memory store for collections of schema-less records.
//!
//! This crate is the public entry point and re-exports the workspace crates:
//!
//! - `Collection`: ordered records indexed by primary key, with change events
//! - `View` / `Proxy`: derived collections kept in sync with a source
//! - `join`: relational trimming across named collections
//! - `Selection`, `Matcher` and the `contains` / `fuzzy` / `min` / `max` /
//!   `within` combinators: the predicate language used by `where_`, `not`,
//!   `remove`, `keep` and `join`
//!
//! # Example
//!
//! ```rust
//! use recollect::prelude::*;
//!
//! let people = Collection::new();
//! let doe = View::new(&people, Selection::new().with("last_name", "doe"));
//!
//! people.add([
//!     Record::try_from(json!({"id": 1, "first_name": "john", "last_name": "redford"})).unwrap(),
//!     Record::try_from(json!({"id": 2, "first_name": "fred", "last_name": "doe"})).unwrap(),
//!     Record::try_from(json!({"id": 3, "first_name": "tim", "last_name": "doe"})).unwrap(),
//! ]);
//! assert_eq!(doe.select("first_name"), vec![json!("fred"), json!("tim")]);
//!
//! people.remove(("first_name", fuzzy("ti")));
//! assert_eq!(doe.size(), 1);
//! ```
//!
//! # Features
//!
//! - `ordered-index`: keep primary key indexes in a `BTreeMap`.

pub use recollect_core::{
    contains, fuzzy, json, key, matcher, max, min, path, uuid, value, within, ComputeFn, Error,
    Field, IndexKey, KeyValues, Map, Matcher, PkSpec, Projection, Record, Result, Selection,
    Value, DELIMITER,
};
pub use recollect_incremental::{Proxy, View};
pub use recollect_query::{join, HashMap, QualifiedAttribute, Relation};
pub use recollect_reactive::{Event, EventBus, EventKind, SubscriptionId, UnknownEvent};
pub use recollect_storage::{
    Collection, Page, ReadCollection, RecordPredicate, RemoveSelector, WeakCollection,
};

/// Everything needed to build, query and observe collections.
pub mod prelude {
    pub use crate::{
        contains, fuzzy, join, json, max, min, within, Collection, Event, EventKind, Matcher,
        PkSpec, Projection, Proxy, ReadCollection, Record, Relation, RemoveSelector, Selection,
        Value, View,
    };
}

//! Recollect Storage - indexed, observable record collections.
//!
//! This crate provides the collection layer:
//!
//! - `Collection`: ordered records, a unique primary key index and an event bus
//! - `RemoveSelector`: what `remove` and `keep` act on
//! - `ReadCollection`: the read API shared by collections, views and proxies
//! - `Page`: pagination results
//!
//! # Example
//!
//! ```rust
//! use recollect_core::{json, matcher, Record, Selection};
//! use recollect_storage::{Collection, ReadCollection};
//!
//! let users = Collection::new();
//! users.add([
//!     Record::try_from(json!({"id": 1, "name": "john", "age": 22})).unwrap(),
//!     Record::try_from(json!({"id": 2, "name": "fred", "age": 16})).unwrap(),
//! ]);
//!
//! let adults = users.where_(&Selection::new().with("age", matcher::min(21)));
//! assert_eq!(adults.select("name"), vec![json!("john")]);
//!
//! users.remove(2);
//! assert_eq!(users.size(), 1);
//! ```
//!
//! # Features
//!
//! - `ordered-index`: keep the primary key index in a `BTreeMap` instead of a
//!   hash map.

mod collection;
mod page;
mod read;
mod selector;
pub mod store;

pub use collection::{Collection, CompareFn, WeakCollection};
pub use page::Page;
pub use read::ReadCollection;
pub use selector::{RecordPredicate, RemoveSelector};
pub use store::RecordStore;

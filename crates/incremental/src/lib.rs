//! Recollect Incremental - derived collections maintained through events.
//!
//! Rather than recomputing a subset whenever its source changes, the types in
//! this crate subscribe to the source's event bus and apply each change as it
//! happens:
//!
//! - `View`: the records of a source matching a fixed selection; writes are
//!   forwarded to the source
//! - `Proxy`: a hand-picked subset of a source; removals in the source
//!   cascade into the proxy and from there into proxies built on it
//!
//! Both read through [`recollect_storage::ReadCollection`] and unsubscribe
//! from their source when dropped.
//!
//! # Example
//!
//! ```rust
//! use recollect_core::{json, Record, Selection};
//! use recollect_incremental::{Proxy, View};
//! use recollect_storage::{Collection, ReadCollection};
//!
//! let people = Collection::new();
//! let adults = View::new(&people, Selection::new().with("adult", true));
//! let starred = Proxy::new(&adults);
//!
//! let tim = Record::try_from(json!({"id": 3, "adult": true})).unwrap();
//! people.add([tim.clone()]);
//! starred.add([tim]);
//! assert_eq!(starred.size(), 1);
//!
//! people.remove(3);
//! assert!(adults.is_empty());
//! assert!(starred.is_empty());
//! ```

mod proxy;
mod view;

pub use proxy::Proxy;
pub use view::View;

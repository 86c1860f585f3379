//! Shared fixtures for the integration test suites.
//!
//! Import via `mod common;` from any test file.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Once;

pub use recollect::prelude::*;

static INIT_TRACING: Once = Once::new();

/// Installs a test-writer subscriber so `RUST_LOG`-style output shows up
/// under `cargo test -- --nocapture`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

pub fn record(value: Value) -> Record {
    Record::try_from(value).unwrap()
}

/// Three people: john (engineer), fred (technician) and tim (engineer).
pub struct People {
    pub john: Record,
    pub fred: Record,
    pub tim: Record,
}

impl People {
    pub fn new() -> Self {
        Self {
            john: record(json!({
                "id": 1, "first_name": "john", "last_name": "redford",
                "xid": "x1", "age": 22, "job_id": 1
            })),
            fred: record(json!({
                "id": 2, "first_name": "fred", "last_name": "doe",
                "xid": "x2", "age": 16, "job_id": 2
            })),
            tim: record(json!({
                "id": 3, "first_name": "tim", "last_name": "doe",
                "xid": "x3", "age": 55, "job_id": 1
            })),
        }
    }

    /// john, fred, tim in that order.
    pub fn all(&self) -> Vec<Record> {
        vec![self.john.clone(), self.fred.clone(), self.tim.clone()]
    }

    pub fn collection(&self) -> Collection {
        Collection::from_records(self.all(), "id")
    }
}

pub fn jobs() -> Vec<Record> {
    vec![
        record(json!({"id": 1, "title": "engineer"})),
        record(json!({"id": 2, "title": "technician"})),
    ]
}

pub fn books() -> Vec<Record> {
    vec![
        record(json!({"id": 1, "title": "A Midsummer Night's Dream"})),
        record(json!({"id": 2, "title": "Twelfth Night"})),
        record(json!({"id": 3, "title": "The Merchant of Venice"})),
    ]
}

pub fn address_join() -> Vec<Record> {
    vec![
        record(json!({"id": 1, "user_id": 1, "address_id": 1})),
        record(json!({"id": 2, "user_id": 1, "address_id": 2})),
        record(json!({"id": 3, "user_id": 2, "address_id": 2})),
        record(json!({"id": 4, "user_id": 3, "address_id": 4})),
    ]
}

pub fn addresses() -> Vec<Record> {
    vec![
        record(json!({"id": 1, "street": "123 rose ave", "city": "New York", "zipcode": "10005"})),
        record(json!({"id": 2, "street": "321 blue street", "city": "New York", "zipcode": "1006"})),
        record(json!({"id": 3, "street": "456 red blvd", "city": "Los Angeles", "zipcode": "90046"})),
        record(json!({"id": 4, "street": "65 black rd", "city": "Los Angeles", "zipcode": "90046"})),
    ]
}

/// A shared flag set by a listener.
pub fn flag() -> (Rc<Cell<bool>>, Rc<Cell<bool>>) {
    let flag = Rc::new(Cell::new(false));
    (flag.clone(), flag)
}

/// A shared counter bumped by a listener.
pub fn counter() -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    (count.clone(), count)
}

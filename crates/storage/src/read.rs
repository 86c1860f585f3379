//! Read API shared by every collection-like type.

use crate::collection::Collection;
use crate::page::Page;
use core::ops::ControlFlow;
use recollect_core::value::strict_eq;
use recollect_core::{IndexKey, KeyValues, PkSpec, Projection, Record, Selection, Value};
use recollect_reactive::{Event, EventKind, SubscriptionId};

/// Non-mutating operations over a collection's current records.
///
/// Implementors only expose the [`Collection`] holding their records; every
/// read is provided on top of it. Results that are collections (`where_`,
/// `not`, `filter`) are fresh, independent collections with the same primary
/// key and no listeners.
pub trait ReadCollection {
    /// Returns the collection whose records this type exposes.
    fn collection(&self) -> &Collection;

    /// Returns the records in order.
    fn records(&self) -> Vec<Record> {
        self.collection().store().records()
    }

    /// Returns the number of records.
    fn size(&self) -> usize {
        self.collection().store().len()
    }

    /// Returns true if there are no records.
    fn is_empty(&self) -> bool {
        self.collection().store().is_empty()
    }

    /// Returns the primary key specification.
    fn primary_key(&self) -> PkSpec {
        self.collection().store().pk().clone()
    }

    /// Extracts the primary key value(s) of a record.
    fn key_values(&self, record: &Record) -> KeyValues {
        self.collection().store().pk().values_of(record)
    }

    /// Returns the index key of a record.
    fn index_key(&self, record: &Record) -> IndexKey {
        self.collection().store().pk().index_key(record)
    }

    /// Looks a record up by its encoded index key.
    fn lookup(&self, key: &IndexKey) -> Option<Record> {
        self.collection().store().get(key).cloned()
    }

    /// Looks a record up by primary key value.
    ///
    /// A composed key is given as an array of its components.
    fn get(&self, key: impl Into<Value>) -> Option<Record>
    where
        Self: Sized,
    {
        let key = self.collection().store().pk().key_for(&key.into());
        self.lookup(&key)
    }

    /// Returns true if a record is stored under the primary key value.
    fn contains_key(&self, key: impl Into<Value>) -> bool
    where
        Self: Sized,
    {
        let store = self.collection().store();
        let key = store.pk().key_for(&key.into());
        store.contains_key(&key)
    }

    /// Returns the first record whose `attribute` strictly equals `value`.
    ///
    /// The single key attribute is looked up through the index; any other
    /// attribute is a linear scan.
    fn find(&self, attribute: &str, value: impl Into<Value>) -> Option<Record>
    where
        Self: Sized,
    {
        let value = value.into();
        if self.collection().store().pk().is_key_attribute(attribute) {
            return self.get(value);
        }
        self.records().into_iter().find(|record| {
            record.with_value(attribute, |v| v.map(|v| strict_eq(v, &value)).unwrap_or(false))
        })
    }

    /// Visits records in order.
    ///
    /// `Continue(Some(t))` collects `t`, `Continue(None)` skips and `Break`
    /// stops the iteration.
    fn each<T, F>(&self, mut f: F) -> Vec<T>
    where
        Self: Sized,
        F: FnMut(&Record, usize) -> ControlFlow<(), Option<T>>,
    {
        let mut out = Vec::new();
        for (position, record) in self.records().iter().enumerate() {
            match f(record, position) {
                ControlFlow::Continue(Some(item)) => out.push(item),
                ControlFlow::Continue(None) => {}
                ControlFlow::Break(()) => break,
            }
        }
        out
    }

    /// Returns a new collection of the records matching `selection`.
    fn where_(&self, selection: &Selection) -> Collection {
        self.where_inverted(selection, false)
    }

    /// Returns a new collection of the records not matching `selection`.
    fn not(&self, selection: &Selection) -> Collection {
        self.where_inverted(selection, true)
    }

    /// Shared body of `where_` and `not`.
    fn where_inverted(&self, selection: &Selection, invert: bool) -> Collection {
        let matching: Vec<Record> = self
            .records()
            .into_iter()
            .filter(|record| selection.matches_inverted(record, invert))
            .collect();
        Collection::from_records(matching, self.primary_key())
    }

    /// Returns a new collection of the records accepted by `f`.
    ///
    /// `f` receives each record, the full record sequence and the position.
    fn filter<F>(&self, mut f: F) -> Collection
    where
        Self: Sized,
        F: FnMut(&Record, &[Record], usize) -> bool,
    {
        let records = self.records();
        let matching: Vec<Record> = records
            .iter()
            .enumerate()
            .filter(|(position, record)| f(record, &records, *position))
            .map(|(_, record)| record.clone())
            .collect();
        Collection::from_records(matching, self.primary_key())
    }

    /// Projects every record.
    fn select(&self, projection: impl Into<Projection>) -> Vec<Value>
    where
        Self: Sized,
    {
        let projection = projection.into();
        let pk = self.primary_key();
        self.records()
            .iter()
            .map(|record| projection.project(record, &pk))
            .collect()
    }

    /// Returns the raw value at `path` for every record, absence preserved.
    fn pluck(&self, path: &str) -> Vec<Option<Value>> {
        self.records().iter().map(|record| record.get(path)).collect()
    }

    /// Returns page `page` (1-based) of `page_size` records.
    fn page(&self, page_size: usize, page: usize) -> Page {
        Page::slice(&self.records(), page_size, page)
    }

    /// Registers a listener on this collection's events.
    fn on<F>(&self, kind: EventKind, callback: F) -> SubscriptionId
    where
        Self: Sized,
        F: Fn(&Event) + 'static,
    {
        self.collection().events().on(kind, callback)
    }

    /// Removes a listener. Returns true if it was registered.
    fn off(&self, kind: EventKind, id: SubscriptionId) -> bool {
        self.collection().events().off(kind, id)
    }

    /// Dispatches an event to this collection's listeners.
    fn fire(&self, event: &Event) {
        self.collection().events().fire(event)
    }
}

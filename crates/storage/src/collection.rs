//! Observable record collections.
//!
//! A `Collection` is a cheap, clonable handle: clones share the same records,
//! index and listeners. Use [`Collection::duplicate`] for an independent copy.
//!
//! Every mutation comes in two forms. The plain form fires its events
//! (`add`/`remove`/`sort` followed by `change`); the `_silent` form does not.
//! Events are dispatched after the mutation is complete and no internal
//! borrow is held, so listeners may read or mutate the collection.

use crate::read::ReadCollection;
use crate::selector::RemoveSelector;
use crate::store::{Entry, RecordStore};
use core::cell::{Ref, RefCell, RefMut};
use core::cmp::Ordering;
use core::fmt;
use recollect_core::value::compare_optional;
use recollect_core::{IndexKey, PkSpec, Record, Value};
use recollect_reactive::{Event, EventBus};
use std::rc::{Rc, Weak};

/// Comparator over two resolved, possibly absent, attribute values.
pub type CompareFn<'a> = &'a dyn Fn(Option<&Value>, Option<&Value>) -> Ordering;

struct Shared {
    store: RefCell<RecordStore>,
    events: EventBus,
}

/// An ordered, key-indexed and observable set of records.
///
/// ```
/// use recollect_core::json;
/// use recollect_storage::{Collection, ReadCollection};
///
/// let people = Collection::new();
/// let tim = recollect_core::Record::try_from(json!({"id": 3, "name": "tim"})).unwrap();
/// people.add([tim.clone()]).sort("name");
/// assert_eq!(people.get(3), Some(tim));
/// ```
#[derive(Clone)]
pub struct Collection {
    shared: Rc<Shared>,
}

/// A non-owning reference to a [`Collection`].
#[derive(Clone)]
pub struct WeakCollection {
    shared: Weak<Shared>,
}

impl WeakCollection {
    /// Returns the collection if it is still alive.
    pub fn upgrade(&self) -> Option<Collection> {
        self.shared.upgrade().map(|shared| Collection { shared })
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection {
    /// Creates an empty collection keyed on `id`.
    pub fn new() -> Self {
        Self::with_primary_key(PkSpec::default())
    }

    /// Creates an empty collection with the given primary key.
    pub fn with_primary_key(pk: impl Into<PkSpec>) -> Self {
        Self {
            shared: Rc::new(Shared {
                store: RefCell::new(RecordStore::new(pk.into())),
                events: EventBus::new(),
            }),
        }
    }

    /// Creates a collection holding `records`, without firing events.
    pub fn from_records(records: impl IntoIterator<Item = Record>, pk: impl Into<PkSpec>) -> Self {
        let collection = Self::with_primary_key(pk);
        collection.add_silent(records);
        collection
    }

    /// Returns an independent collection with the same records, order and key.
    ///
    /// Records are shared; listeners are not copied.
    pub fn duplicate(&self) -> Collection {
        let pk = self.store().pk().clone();
        Self::from_records(self.store().records(), pk)
    }

    /// Returns a weak handle to this collection.
    pub fn downgrade(&self) -> WeakCollection {
        WeakCollection {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Returns true if both handles refer to the same collection.
    #[inline]
    pub fn ptr_eq(&self, other: &Collection) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// Returns the listener table.
    #[inline]
    pub fn events(&self) -> &EventBus {
        &self.shared.events
    }

    #[inline]
    pub(crate) fn store(&self) -> Ref<'_, RecordStore> {
        self.shared.store.borrow()
    }

    #[inline]
    fn store_mut(&self) -> RefMut<'_, RecordStore> {
        self.shared.store.borrow_mut()
    }

    /// Returns a snapshot of the stored entries.
    pub(crate) fn entries(&self) -> Vec<Entry> {
        self.store().entries().to_vec()
    }

    /// Checks that the sequence and the key index agree.
    pub fn is_consistent(&self) -> bool {
        self.store().is_consistent()
    }

    // =====================================================================
    // add
    // =====================================================================

    /// Appends records, replacing any record stored under the same key.
    ///
    /// Fires `add` with the records as given, then `change`.
    pub fn add(&self, records: impl IntoIterator<Item = Record>) -> &Self {
        self.add_with(records, false)
    }

    /// Appends records without firing events.
    pub fn add_silent(&self, records: impl IntoIterator<Item = Record>) -> &Self {
        self.add_with(records, true)
    }

    /// Appends a single record.
    pub fn add_one(&self, record: &Record) -> &Self {
        self.add_with([record.clone()], false)
    }

    fn add_with(&self, records: impl IntoIterator<Item = Record>, silent: bool) -> &Self {
        let added: Vec<Record> = records.into_iter().collect();
        if added.is_empty() {
            return self;
        }
        let mut replaced = 0;
        {
            let mut store = self.store_mut();
            for record in &added {
                if store.insert(record.clone()).is_some() {
                    replaced += 1;
                }
            }
        }
        tracing::trace!(added = added.len(), replaced, silent, "add");
        if !silent {
            self.fire(&Event::Add(added));
            self.fire(&Event::Change);
        }
        self
    }

    // =====================================================================
    // remove / keep / empty
    // =====================================================================

    /// Removes the selected records.
    ///
    /// Fires `remove` with the removed records in collection order, then
    /// `change`. Nothing fires when nothing was removed.
    pub fn remove(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.remove_with(&selector.into(), false, false)
    }

    /// Removes the selected records without firing events.
    pub fn remove_silent(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.remove_with(&selector.into(), false, true)
    }

    /// Removes every record that is not selected.
    pub fn keep(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.remove_with(&selector.into(), true, false)
    }

    /// Removes every record that is not selected, without firing events.
    pub fn keep_silent(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.remove_with(&selector.into(), true, true)
    }

    fn remove_with(&self, selector: &RemoveSelector, invert: bool, silent: bool) -> &Self {
        let resolved = selector.resolve(self.store().pk());
        // Selector predicates run against a snapshot so they may read the collection.
        let doomed: Vec<IndexKey> = self
            .entries()
            .into_iter()
            .filter(|(key, record)| resolved.matches(key, record) != invert)
            .map(|(key, _)| key)
            .collect();
        if doomed.is_empty() {
            return self;
        }
        let removed = self.store_mut().remove_keys(&doomed);
        tracing::trace!(removed = removed.len(), invert, silent, "remove");
        if !silent && !removed.is_empty() {
            self.fire(&Event::Remove(removed));
            self.fire(&Event::Change);
        }
        self
    }

    /// Removes every record.
    pub fn empty(&self) -> &Self {
        self.empty_with(false)
    }

    /// Removes every record without firing events.
    pub fn empty_silent(&self) -> &Self {
        self.empty_with(true)
    }

    fn empty_with(&self, silent: bool) -> &Self {
        let removed = self.store_mut().clear();
        if removed.is_empty() {
            return self;
        }
        tracing::trace!(removed = removed.len(), silent, "empty");
        if !silent {
            self.fire(&Event::Remove(removed));
            self.fire(&Event::Change);
        }
        self
    }

    // =====================================================================
    // sort / reverse
    // =====================================================================

    /// Sorts ascending on the value at `attribute`.
    ///
    /// Uses the total value order: absent < null < bool < number < string <
    /// array < object. Records with equal values are ordered by key, so the
    /// result does not depend on the previous order.
    pub fn sort(&self, attribute: &str) -> &Self {
        self.sort_with(attribute, None, false)
    }

    /// Sorts without firing events.
    pub fn sort_silent(&self, attribute: &str) -> &Self {
        self.sort_with(attribute, None, true)
    }

    /// Sorts on `attribute` with a custom comparator.
    ///
    /// `compare` must be a total order over the values it is given. An
    /// inconsistent comparator leaves the order unspecified and may panic.
    pub fn sort_by<F>(&self, attribute: &str, compare: F) -> &Self
    where
        F: Fn(Option<&Value>, Option<&Value>) -> Ordering,
    {
        self.sort_with(attribute, Some(&compare), false)
    }

    /// Sorts with a custom comparator without firing events.
    ///
    /// Same contract on `compare` as [`Collection::sort_by`].
    pub fn sort_by_silent<F>(&self, attribute: &str, compare: F) -> &Self
    where
        F: Fn(Option<&Value>, Option<&Value>) -> Ordering,
    {
        self.sort_with(attribute, Some(&compare), true)
    }

    fn sort_with(&self, attribute: &str, compare: Option<CompareFn<'_>>, silent: bool) -> &Self {
        let entries = self.entries();
        if entries.is_empty() {
            return self;
        }
        let mut decorated: Vec<(Option<Value>, Entry)> = entries
            .into_iter()
            .map(|(key, record)| (record.get(attribute), (key, record)))
            .collect();
        decorated.sort_by(|(a, (ka, _)), (b, (kb, _))| {
            let ord = match compare {
                Some(compare) => compare(a.as_ref(), b.as_ref()),
                None => compare_optional(a.as_ref(), b.as_ref()),
            };
            ord.then_with(|| ka.cmp(kb))
        });
        self.store_mut()
            .set_order(decorated.into_iter().map(|(_, entry)| entry).collect());
        tracing::trace!(attribute, silent, "sort");
        if !silent {
            self.fire(&Event::Sort);
            self.fire(&Event::Change);
        }
        self
    }

    /// Reverses the record order.
    pub fn reverse(&self) -> &Self {
        self.reverse_with(false)
    }

    /// Reverses the record order without firing events.
    pub fn reverse_silent(&self) -> &Self {
        self.reverse_with(true)
    }

    fn reverse_with(&self, silent: bool) -> &Self {
        if self.store().is_empty() {
            return self;
        }
        self.store_mut().reverse();
        tracing::trace!(silent, "reverse");
        if !silent {
            self.fire(&Event::Sort);
            self.fire(&Event::Change);
        }
        self
    }
}

impl ReadCollection for Collection {
    #[inline]
    fn collection(&self) -> &Collection {
        self
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.store();
        f.debug_struct("Collection")
            .field("primary_key", store.pk())
            .field("records", &store.records())
            .finish()
    }
}

//! Record storage for one collection.
//!
//! This module provides the `RecordStore` struct which keeps the ordered
//! sequence of records and the primary key index in lockstep. It never runs
//! caller code and never fires events; `Collection` layers both on top.

use hashbrown::HashSet;
use recollect_core::{IndexKey, PkSpec, Record};

/// Key index backend: HashMap (O(1) lookup) or BTreeMap (ordered keys).
#[cfg(not(feature = "ordered-index"))]
type KeyIndex = hashbrown::HashMap<IndexKey, Record>;
#[cfg(feature = "ordered-index")]
type KeyIndex = std::collections::BTreeMap<IndexKey, Record>;

/// A record and the index key it was stored under.
pub type Entry = (IndexKey, Record);

/// Ordered records plus a unique key index.
///
/// Invariant: every entry in the sequence has exactly one index entry under
/// its key, and every index entry points at a record in the sequence. Keys
/// are computed once, on insert; a record whose key fields are later mutated
/// in place stays filed under its original key until it is re-added.
pub struct RecordStore {
    pk: PkSpec,
    entries: Vec<Entry>,
    index: KeyIndex,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new(pk: PkSpec) -> Self {
        Self {
            pk,
            entries: Vec::new(),
            index: KeyIndex::default(),
        }
    }

    /// Returns the primary key specification.
    #[inline]
    pub fn pk(&self) -> &PkSpec {
        &self.pk
    }

    /// Returns the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries in sequence order.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns record handles in sequence order.
    pub fn records(&self) -> Vec<Record> {
        self.entries.iter().map(|(_, r)| r.clone()).collect()
    }

    /// Looks a record up by index key.
    #[inline]
    pub fn get(&self, key: &IndexKey) -> Option<&Record> {
        self.index.get(key)
    }

    /// Returns true if a record is stored under `key`.
    #[inline]
    pub fn contains_key(&self, key: &IndexKey) -> bool {
        self.index.contains_key(key)
    }

    /// Appends a record.
    ///
    /// A record already stored under the same key is first taken out of its
    /// slot, so a re-added key always moves to the end. Returns the replaced
    /// record.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        let key = self.pk.index_key(&record);
        let replaced = self.index.remove(&key);
        if replaced.is_some() {
            if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
                self.entries.remove(pos);
            }
        }
        self.index.insert(key.clone(), record.clone());
        self.entries.push((key, record));
        replaced
    }

    /// Removes the records stored under `keys`, returning them in sequence order.
    pub fn remove_keys(&mut self, keys: &[IndexKey]) -> Vec<Record> {
        if keys.is_empty() {
            return Vec::new();
        }
        let doomed: HashSet<&IndexKey> = keys.iter().collect();
        let mut removed = Vec::with_capacity(keys.len());
        let mut kept = Vec::with_capacity(self.entries.len());
        for (key, record) in self.entries.drain(..) {
            if doomed.contains(&key) {
                self.index.remove(&key);
                removed.push(record);
            } else {
                kept.push((key, record));
            }
        }
        self.entries = kept;
        removed
    }

    /// Removes every record, returning them in sequence order.
    pub fn clear(&mut self) -> Vec<Record> {
        self.index.clear();
        self.entries.drain(..).map(|(_, r)| r).collect()
    }

    /// Reverses the sequence in place.
    pub fn reverse(&mut self) {
        self.entries.reverse();
    }

    /// Replaces the sequence with a reordering of it and rebuilds the index
    /// from the new sequence.
    pub fn set_order(&mut self, entries: Vec<Entry>) {
        self.index = entries
            .iter()
            .map(|(k, r)| (k.clone(), r.clone()))
            .collect();
        self.entries = entries;
    }

    /// Checks the sequence/index invariant.
    pub fn is_consistent(&self) -> bool {
        self.entries.len() == self.index.len()
            && self
                .entries
                .iter()
                .all(|(k, r)| self.index.get(k).map(|i| i.ptr_eq(r)).unwrap_or(false))
    }
}

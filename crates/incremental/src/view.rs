//! Views: filtered reflections of a source collection.
//!
//! A `View` materializes `source.where_(selection)` once and then follows the
//! source through its `add` and `remove` events. Writes go to the source and
//! come back to the view through those events.

use recollect_core::{Record, Selection};
use recollect_reactive::{Event, EventKind, SubscriptionId};
use recollect_storage::{Collection, ReadCollection, RemoveSelector, WeakCollection};

/// A live, filtered subset of a source collection.
///
/// ```
/// use recollect_core::{json, Record, Selection};
/// use recollect_incremental::View;
/// use recollect_storage::{Collection, ReadCollection};
///
/// let people = Collection::new();
/// let engineers = View::new(&people, Selection::new().with("job_id", 1));
///
/// people.add([Record::try_from(json!({"id": 7, "job_id": 1})).unwrap()]);
/// assert_eq!(engineers.size(), 1);
///
/// engineers.remove(7);
/// assert!(people.is_empty());
/// ```
pub struct View {
    source: Collection,
    selection: Selection,
    materialized: Collection,
    subscriptions: Vec<(EventKind, SubscriptionId)>,
}

impl View {
    /// Creates a view of the records in `source` matching `selection`.
    pub fn new(source: &Collection, selection: Selection) -> Self {
        let materialized = source.where_(&selection);
        let subscriptions = vec![
            (
                EventKind::Add,
                source.on(
                    EventKind::Add,
                    on_source_add(source.downgrade(), materialized.downgrade(), selection.clone()),
                ),
            ),
            (
                EventKind::Remove,
                source.on(EventKind::Remove, on_source_remove(materialized.downgrade())),
            ),
        ];
        tracing::debug!(size = materialized.size(), "view created");
        Self {
            source: source.clone(),
            selection,
            materialized,
            subscriptions,
        }
    }

    /// Returns the source collection.
    #[inline]
    pub fn source(&self) -> &Collection {
        &self.source
    }

    /// Returns the selection the view is bound to.
    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Adds records to the source.
    pub fn add(&self, records: impl IntoIterator<Item = Record>) -> &Self {
        self.source.add(records);
        self
    }

    /// Adds records to the source without firing events on either side.
    ///
    /// The view applies the change itself. Other listeners on the source,
    /// including other views, do not see it.
    pub fn add_silent(&self, records: impl IntoIterator<Item = Record>) -> &Self {
        let records: Vec<Record> = records.into_iter().collect();
        self.source.add_silent(records.iter().cloned());
        sync_add(&self.source, &self.materialized, &self.selection, &records, true);
        self
    }

    /// Adds one record to the source.
    pub fn add_one(&self, record: &Record) -> &Self {
        self.source.add_one(record);
        self
    }

    /// Removes the selected records from the source.
    pub fn remove(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.source.remove(selector);
        self
    }

    /// Removes the selected records from the source without firing events.
    pub fn remove_silent(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.source.remove_silent(selector);
        prune_missing(&self.source, &self.materialized);
        self
    }

    /// Removes every source record that is not selected.
    pub fn keep(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.source.keep(selector);
        self
    }

    /// Removes every source record that is not selected, without firing events.
    pub fn keep_silent(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.source.keep_silent(selector);
        prune_missing(&self.source, &self.materialized);
        self
    }

    /// Empties the source.
    pub fn empty(&self) -> &Self {
        self.source.empty();
        self
    }

    /// Empties the source and the view without firing events.
    pub fn empty_silent(&self) -> &Self {
        self.source.empty_silent();
        self.materialized.empty_silent();
        self
    }

    /// Sorts the view's own records. The source order is untouched.
    pub fn sort(&self, attribute: &str) -> &Self {
        self.materialized.sort(attribute);
        self
    }

    pub fn sort_silent(&self, attribute: &str) -> &Self {
        self.materialized.sort_silent(attribute);
        self
    }

    /// Reverses the view's own records.
    pub fn reverse(&self) -> &Self {
        self.materialized.reverse();
        self
    }

    pub fn reverse_silent(&self) -> &Self {
        self.materialized.reverse_silent();
        self
    }
}

/// Applies records added to `source` to the materialized `view`.
///
/// Only records still current in the source count: within one batch a later
/// record replaces an earlier one under the same key. Matching records are
/// added; a non-matching record whose key is materialized evicts the stale
/// member.
fn sync_add(
    source: &Collection,
    view: &Collection,
    selection: &Selection,
    records: &[Record],
    silent: bool,
) {
    let (matching, rejected): (Vec<Record>, Vec<Record>) = records
        .iter()
        .filter(|record| {
            source
                .lookup(&source.index_key(record))
                .map(|current| current.ptr_eq(record))
                .unwrap_or(false)
        })
        .cloned()
        .partition(|record| selection.matches(record));
    let stale: Vec<Record> = rejected
        .into_iter()
        .filter(|record| view.lookup(&view.index_key(record)).is_some())
        .collect();

    tracing::debug!(added = matching.len(), stale = stale.len(), silent, "view sync add");
    if !stale.is_empty() {
        let stale = RemoveSelector::records(stale);
        if silent {
            view.remove_silent(stale);
        } else {
            view.remove(stale);
        }
    }
    if !matching.is_empty() {
        if silent {
            view.add_silent(matching);
        } else {
            view.add(matching);
        }
    }
}

/// Silently drops view members the source no longer holds.
fn prune_missing(source: &Collection, view: &Collection) {
    let source = source.clone();
    view.keep_silent(RemoveSelector::predicate(move |record| {
        source
            .lookup(&source.index_key(record))
            .map(|current| current.ptr_eq(record))
            .unwrap_or(false)
    }));
}

/// Follows source additions.
fn on_source_add(
    source: WeakCollection,
    target: WeakCollection,
    selection: Selection,
) -> impl Fn(&Event) + 'static {
    move |event| {
        let (Some(source), Some(view)) = (source.upgrade(), target.upgrade()) else {
            return;
        };
        sync_add(&source, &view, &selection, event.records(), false);
    }
}

/// Follows source removals by key.
fn on_source_remove(target: WeakCollection) -> impl Fn(&Event) + 'static {
    move |event| {
        let Some(view) = target.upgrade() else {
            return;
        };
        tracing::debug!(removed = event.records().len(), "view sync remove");
        view.remove(RemoveSelector::records(event.records().to_vec()));
    }
}

impl ReadCollection for View {
    #[inline]
    fn collection(&self) -> &Collection {
        &self.materialized
    }
}

impl Drop for View {
    fn drop(&mut self) {
        for (kind, id) in self.subscriptions.drain(..) {
            self.source.off(kind, id);
        }
    }
}

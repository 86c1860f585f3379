//! Proxies: hand-picked subsets of a source that never outlive their records.

use recollect_core::Record;
use recollect_reactive::{Event, EventKind, SubscriptionId};
use recollect_storage::{Collection, ReadCollection, RemoveSelector, WeakCollection};

/// A caller-managed subset of a source collection.
///
/// A proxy starts empty. Only records currently present in the source (by
/// primary key) can be added; when the source removes a record, so does the
/// proxy, and it fires its own `remove` event. Proxies of proxies therefore
/// cascade removals layer by layer.
///
/// ```
/// use recollect_core::{json, Record};
/// use recollect_incremental::Proxy;
/// use recollect_storage::{Collection, ReadCollection};
///
/// let tim = Record::try_from(json!({"id": 3})).unwrap();
/// let people = Collection::new();
/// people.add([tim.clone()]);
///
/// let selection = Proxy::new(&people);
/// let highlight = Proxy::new(&selection);
/// selection.add([tim.clone()]);
/// highlight.add([tim]);
///
/// people.remove(3);
/// assert!(selection.is_empty());
/// assert!(highlight.is_empty());
/// ```
pub struct Proxy {
    source: Collection,
    members: Collection,
    subscriptions: Vec<(EventKind, SubscriptionId)>,
}

impl Proxy {
    /// Creates an empty proxy over `source`.
    pub fn new<S: ReadCollection>(source: &S) -> Self {
        let source = source.collection().clone();
        let members = Collection::with_primary_key(source.primary_key());
        let subscriptions = vec![
            (
                EventKind::Add,
                source.on(
                    EventKind::Add,
                    on_source_add(source.downgrade(), members.downgrade()),
                ),
            ),
            (
                EventKind::Remove,
                source.on(EventKind::Remove, on_source_remove(members.downgrade())),
            ),
        ];
        Self {
            source,
            members,
            subscriptions,
        }
    }

    /// Returns the collection the proxy draws its records from.
    #[inline]
    pub fn source(&self) -> &Collection {
        &self.source
    }

    /// Adds the records whose key currently resolves in the source.
    ///
    /// Other records are dropped without error.
    pub fn add(&self, records: impl IntoIterator<Item = Record>) -> &Self {
        self.add_with(records, false)
    }

    /// Adds records without firing events.
    pub fn add_silent(&self, records: impl IntoIterator<Item = Record>) -> &Self {
        self.add_with(records, true)
    }

    /// Adds a single record.
    pub fn add_one(&self, record: &Record) -> &Self {
        self.add_with([record.clone()], false)
    }

    fn add_with(&self, records: impl IntoIterator<Item = Record>, silent: bool) -> &Self {
        let (valid, dropped): (Vec<Record>, Vec<Record>) = records
            .into_iter()
            .partition(|record| self.source.lookup(&self.source.index_key(record)).is_some());
        if !dropped.is_empty() {
            tracing::debug!(dropped = dropped.len(), "proxy add outside source");
        }
        if silent {
            self.members.add_silent(valid);
        } else {
            self.members.add(valid);
        }
        self
    }

    /// Removes the selected records from the proxy.
    pub fn remove(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.members.remove(selector);
        self
    }

    /// Removes the selected records from the proxy without firing events.
    pub fn remove_silent(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.members.remove_silent(selector);
        self
    }

    /// Removes every proxy record that is not selected.
    pub fn keep(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.members.keep(selector);
        self
    }

    pub fn keep_silent(&self, selector: impl Into<RemoveSelector>) -> &Self {
        self.members.keep_silent(selector);
        self
    }

    /// Empties the proxy.
    pub fn empty(&self) -> &Self {
        self.members.empty();
        self
    }

    pub fn empty_silent(&self) -> &Self {
        self.members.empty_silent();
        self
    }

    /// Sorts the proxy's records.
    pub fn sort(&self, attribute: &str) -> &Self {
        self.members.sort(attribute);
        self
    }

    pub fn sort_silent(&self, attribute: &str) -> &Self {
        self.members.sort_silent(attribute);
        self
    }

    /// Reverses the proxy's records.
    pub fn reverse(&self) -> &Self {
        self.members.reverse();
        self
    }

    pub fn reverse_silent(&self) -> &Self {
        self.members.reverse_silent();
        self
    }
}

/// Swaps in the source's new handle for any member whose key was re-added.
fn on_source_add(source: WeakCollection, target: WeakCollection) -> impl Fn(&Event) + 'static {
    move |event| {
        let (Some(source), Some(proxy)) = (source.upgrade(), target.upgrade()) else {
            return;
        };
        let swapped: Vec<Record> = event
            .records()
            .iter()
            .filter(|record| {
                let key = proxy.index_key(record);
                let is_member = proxy
                    .lookup(&key)
                    .map(|member| !member.ptr_eq(record))
                    .unwrap_or(false);
                is_member
                    && source
                        .lookup(&key)
                        .map(|current| current.ptr_eq(record))
                        .unwrap_or(false)
            })
            .cloned()
            .collect();
        if !swapped.is_empty() {
            tracing::debug!(swapped = swapped.len(), "proxy sync add");
            proxy.add(swapped);
        }
    }
}

/// Prunes members the source removed and re-fires the removal.
fn on_source_remove(target: WeakCollection) -> impl Fn(&Event) + 'static {
    move |event| {
        let Some(proxy) = target.upgrade() else {
            return;
        };
        tracing::debug!(removed = event.records().len(), "proxy sync remove");
        proxy.remove(RemoveSelector::records(event.records().to_vec()));
    }
}

impl ReadCollection for Proxy {
    #[inline]
    fn collection(&self) -> &Collection {
        &self.members
    }
}

impl Drop for Proxy {
    fn drop(&mut self) {
        for (kind, id) in self.subscriptions.drain(..) {
            self.source.off(kind, id);
        }
    }
}

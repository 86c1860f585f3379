//! Per-collection event bus.
//!
//! Dispatch is synchronous and in registration order. `fire` iterates over a
//! snapshot of the listeners taken when it starts:
//!
//! - a listener registered during a fire does not run in that fire
//! - a listener removed during a fire is deactivated at once and skipped for
//!   the rest of that fire
//!
//! The bus never holds a borrow of its listener table while a callback runs,
//! so callbacks may register, remove, or fire further events.

use crate::event::{Event, EventKind};
use crate::subscription::{Subscription, SubscriptionId};
use core::cell::{Cell, RefCell};
use hashbrown::HashMap;
use std::rc::Rc;

/// Listener table for one collection.
pub struct EventBus {
    /// Event kind -> listeners in registration order
    listeners: RefCell<HashMap<EventKind, Vec<Rc<Subscription>>>>,
    /// Next subscription ID to assign
    next_id: Cell<SubscriptionId>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a bus with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    /// Registers `callback` for `kind` and returns its ID.
    pub fn on<F>(&self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: Fn(&Event) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(Rc::new(Subscription::new(id, callback)));
        id
    }

    /// Removes the listener `id` registered for `kind`.
    ///
    /// Returns true if it was found.
    pub fn off(&self, kind: EventKind, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(subs) = listeners.get_mut(&kind) else {
            return false;
        };
        match subs.iter().position(|s| s.id() == id) {
            Some(pos) => {
                subs.remove(pos).deactivate();
                if subs.is_empty() {
                    listeners.remove(&kind);
                }
                true
            }
            None => false,
        }
    }

    /// Removes the listener `id` whatever kind it was registered for.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        EventKind::ALL.iter().any(|kind| self.off(*kind, id))
    }

    /// Invokes every listener registered for the event's kind.
    pub fn fire(&self, event: &Event) {
        let kind = event.kind();
        let snapshot: Vec<Rc<Subscription>> = match self.listeners.borrow().get(&kind) {
            Some(subs) => subs.clone(),
            None => return,
        };
        tracing::trace!(event = %kind, listeners = snapshot.len(), "fire");
        for sub in snapshot {
            sub.notify(event);
        }
    }

    /// Returns the number of listeners for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow().get(&kind).map_or(0, Vec::len)
    }

    /// Returns true if no listener is registered for any kind.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().values().all(Vec::is_empty)
    }

    /// Removes every listener.
    pub fn clear(&self) {
        let drained: Vec<_> = self.listeners.borrow_mut().drain().collect();
        for (_, subs) in drained {
            for sub in subs {
                sub.deactivate();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recollect_core::{json, Record};

    fn counter() -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let c = Rc::new(Cell::new(0));
        (c.clone(), c)
    }

    #[test]
    fn test_on_assigns_increasing_ids() {
        let bus = EventBus::new();
        let id1 = bus.on(EventKind::Add, |_| {});
        let id2 = bus.on(EventKind::Change, |_| {});
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);
        assert_eq!(bus.listener_count(EventKind::Add), 1);
    }

    #[test]
    fn test_fire_only_matching_kind() {
        let bus = EventBus::new();
        let (count, c) = counter();
        bus.on(EventKind::Change, move |_| c.set(c.get() + 1));

        bus.fire(&Event::Sort);
        assert_eq!(count.get(), 0);
        bus.fire(&Event::Change);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_fire_in_registration_order() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let order = order.clone();
            bus.on(EventKind::Change, move |_| order.borrow_mut().push(i));
        }
        bus.fire(&Event::Change);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_payload_is_delivered() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        bus.on(EventKind::Add, move |event| {
            seen_clone.borrow_mut().extend(event.records().iter().cloned());
        });

        let r = Record::try_from(json!({"id": 1})).unwrap();
        bus.fire(&Event::Add(vec![r.clone()]));
        assert_eq!(*seen.borrow(), vec![r]);
    }

    #[test]
    fn test_off() {
        let bus = EventBus::new();
        let (count, c) = counter();
        let id = bus.on(EventKind::Change, move |_| c.set(c.get() + 1));

        assert!(bus.off(EventKind::Change, id));
        assert!(!bus.off(EventKind::Change, id));
        bus.fire(&Event::Change);
        assert_eq!(count.get(), 0);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_off_wrong_kind() {
        let bus = EventBus::new();
        let id = bus.on(EventKind::Change, |_| {});
        assert!(!bus.off(EventKind::Add, id));
        assert!(bus.unsubscribe(id));
        assert_eq!(bus.listener_count(EventKind::Change), 0);
    }

    #[test]
    fn test_listener_added_during_fire_waits_for_next_fire() {
        let bus = Rc::new(EventBus::new());
        let (count, c) = counter();
        let bus_clone = bus.clone();
        bus.on(EventKind::Change, move |_| {
            let c = c.clone();
            bus_clone.on(EventKind::Change, move |_| c.set(c.get() + 1));
        });

        bus.fire(&Event::Change);
        assert_eq!(count.get(), 0);
        bus.fire(&Event::Change);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_listener_removed_during_fire_is_skipped() {
        let bus = Rc::new(EventBus::new());
        let (count, c) = counter();
        let second_id = Rc::new(Cell::new(0));

        let bus_clone = bus.clone();
        let second = second_id.clone();
        bus.on(EventKind::Change, move |_| {
            bus_clone.off(EventKind::Change, second.get());
        });
        second_id.set(bus.on(EventKind::Change, move |_| c.set(c.get() + 1)));

        bus.fire(&Event::Change);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_clear() {
        let bus = EventBus::new();
        bus.on(EventKind::Add, |_| {});
        bus.on(EventKind::Remove, |_| {});
        bus.clear();
        assert!(bus.is_empty());
    }
}

//! Listeners registered on an event bus.

use crate::event::Event;
use core::cell::Cell;

/// Identifies a listener within one bus. Ids are never reused.
pub type SubscriptionId = u64;

/// Boxed listener callback.
pub type EventCallback = Box<dyn Fn(&Event)>;

/// A listener and its liveness flag.
///
/// The bus hands out `Rc<Subscription>` snapshots to dispatch, so the flag
/// lives in a `Cell`: `off` can silence a listener that a running `fire`
/// still holds.
pub struct Subscription {
    id: SubscriptionId,
    callback: EventCallback,
    active: Cell<bool>,
}

impl Subscription {
    pub fn new<F>(id: SubscriptionId, callback: F) -> Self
    where
        F: Fn(&Event) + 'static,
    {
        Self {
            id,
            callback: Box::new(callback),
            active: Cell::new(true),
        }
    }

    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// False once the listener has been removed from its bus.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    #[inline]
    pub fn deactivate(&self) {
        self.active.set(false);
    }

    /// Runs the callback; a deactivated listener ignores the event.
    pub fn notify(&self, event: &Event) {
        if self.is_active() {
            (self.callback)(event);
        }
    }
}

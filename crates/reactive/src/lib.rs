//! Recollect Reactive - the event bus behind every recollect collection.
//!
//! Each collection owns one `EventBus`. Mutations fire typed events on it,
//! and derived collections (views, proxies) stay in sync by listening to
//! their source's bus.
//!
//! # Core Concepts
//!
//! - `EventKind`: the closed set of event names (`add`, `remove`, `change`, `sort`)
//! - `Event`: an event with its payload (the records added or removed)
//! - `Subscription`: a registered listener
//! - `EventBus`: `on` / `off` / `fire`
//!
//! Dispatch is synchronous: `fire` returns once every listener has run, and a
//! listener may itself mutate collections and cause further fires.
//!
//! # Example
//!
//! ```rust
//! use recollect_reactive::{Event, EventBus, EventKind};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let bus = EventBus::new();
//! let changes = Rc::new(Cell::new(0));
//! let counter = changes.clone();
//! let id = bus.on(EventKind::Change, move |_| counter.set(counter.get() + 1));
//!
//! bus.fire(&Event::Change);
//! bus.off(EventKind::Change, id);
//! bus.fire(&Event::Change);
//! assert_eq!(changes.get(), 1);
//! ```

pub mod bus;
pub mod event;
pub mod subscription;

pub use bus::EventBus;
pub use event::{Event, EventKind, UnknownEvent};
pub use subscription::{EventCallback, Subscription, SubscriptionId};

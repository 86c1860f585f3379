//! Events fired by a collection.
//!
//! The set of event names is closed: `add`, `remove`, `change` and `sort`.
//! `add` and `remove` carry the records involved; `change` fires after any of
//! the other three whenever the set or order of records actually changed.

use core::fmt;
use core::str::FromStr;
use recollect_core::Record;

/// Name of an event, used to register listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Add,
    Remove,
    Change,
    Sort,
}

impl EventKind {
    /// Every event kind.
    pub const ALL: [EventKind; 4] = [
        EventKind::Add,
        EventKind::Remove,
        EventKind::Change,
        EventKind::Sort,
    ];

    /// Returns the lowercase event name.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Add => "add",
            EventKind::Remove => "remove",
            EventKind::Change => "change",
            EventKind::Sort => "sort",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(EventKind::Add),
            "remove" => Ok(EventKind::Remove),
            "change" => Ok(EventKind::Change),
            "sort" => Ok(EventKind::Sort),
            other => Err(UnknownEvent(other.to_string())),
        }
    }
}

/// Returned when parsing a name outside the closed set of events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEvent(pub String);

impl fmt::Display for UnknownEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown event: {}", self.0)
    }
}

impl std::error::Error for UnknownEvent {}

/// An event with its typed payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Records that were added, in the order they were given.
    Add(Vec<Record>),
    /// Records that were removed, in collection order.
    Remove(Vec<Record>),
    Change,
    Sort,
}

impl Event {
    /// Returns the kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Add(_) => EventKind::Add,
            Event::Remove(_) => EventKind::Remove,
            Event::Change => EventKind::Change,
            Event::Sort => EventKind::Sort,
        }
    }

    /// Returns the records carried by the event, if any.
    pub fn records(&self) -> &[Record] {
        match self {
            Event::Add(records) | Event::Remove(records) => records,
            Event::Change | Event::Sort => &[],
        }
    }
}

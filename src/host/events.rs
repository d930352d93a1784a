//! Event notification
//!
//! The ledger emits an event after every successful state mutation. Delivery
//! is fire-and-forget: a sink cannot fail and nothing it does rolls back the
//! storage writes that preceded the emission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event name for token transfers
pub const TRANSFER_EVENT: &str = "TRANSFER";
/// Event name for allowance changes
pub const APPROVAL_EVENT: &str = "APPROVAL";
/// Event name for administrative owner reassignment
pub const CHANGE_OWNER_EVENT: &str = "CHANGE_OWNER";

/// A notification emitted by the ledger after a state mutation.
///
/// Carries the event name and an ordered sequence of string fields, plus the
/// emission timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub fields: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Create an event stamped with the current time
    pub fn new(name: &str, fields: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            fields,
            timestamp: Utc::now(),
        }
    }
}

/// One-directional notification sink.
///
/// Emission happens after the associated storage writes and must not affect
/// them; implementations should swallow their own failures (logging them if
/// useful) rather than surface errors to the ledger.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

/// Recording sink that keeps every emitted event in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The most recently emitted event
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events have been recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events with the given name, oldest first
    pub fn with_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Event> {
        self.events.iter().filter(move |e| e.name == name)
    }

    /// Drain all recorded events, oldest first
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// Sink that forwards events to the `log` facade.
#[derive(Clone, Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: Event) {
        log::info!("event {} [{}]", event.name, event.fields.join(", "));
    }
}

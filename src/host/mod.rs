//! Host-environment collaborators
//!
//! The ledger core runs against three external collaborators supplied by
//! whatever environment embeds it: a durable key-value store, the identity of
//! the current caller, and an event sink. Each is modeled here as a small
//! trait or struct so the core never touches ambient runtime state.

pub mod context;
pub mod events;
pub mod store;

pub use context::CallContext;
pub use events::{Event, EventLog, EventSink, LogSink};
pub use store::{FileStore, FileStoreConfig, KeyValueStore, MemoryStore, StoreError};

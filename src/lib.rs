//! Token Ledger: a storage-backed fungible-token ledger with atomic swaps
//!
//! This crate provides an ERC20-style token ledger that keeps all of its
//! state in an external key-value store, featuring:
//! - Per-address balances with overflow/underflow-safe arithmetic
//! - Allowances for delegated transfers
//! - An administrative owner role per ledger instance
//! - A bilateral swap built from two delegated transfers, committed
//!   all-or-nothing
//! - Event notification on every state mutation
//! - JSON snapshot persistence and an in-memory store for embedding
//!
//! # Example
//!
//! ```rust
//! use token_ledger::host::{CallContext, EventLog, MemoryStore};
//! use token_ledger::ledger::{LedgerError, Namespace, TokenLedger};
//!
//! # fn main() -> Result<(), LedgerError> {
//! let mut store = MemoryStore::new();
//! let mut events = EventLog::new();
//!
//! // Deploy a token; the creator receives the whole supply
//! let ledger = TokenLedger::new(Namespace::new("token1"));
//! ledger.deploy(
//!     &mut store,
//!     &mut events,
//!     &CallContext::with_write_access("alice"),
//!     "alice",
//!     "My Token",
//!     "MTK",
//!     8,
//!     1_000_000,
//! )?;
//!
//! // Move some of it
//! ledger.transfer(&mut store, &mut events, &CallContext::new("alice"), "bob", 1000)?;
//! assert_eq!(ledger.balance_of(&store, "bob")?, 1000);
//! assert_eq!(ledger.balance_of(&store, "alice")?, 999_000);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod codec;
pub mod host;
pub mod ledger;
pub mod swap;

// Re-export commonly used types
pub use codec::CodecError;
pub use host::{
    CallContext, Event, EventLog, EventSink, FileStore, KeyValueStore, LogSink, MemoryStore,
    StoreError,
};
pub use ledger::{LedgerError, Namespace, TokenLedger};
pub use swap::{SwapCoordinator, SwapError};

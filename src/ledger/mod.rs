//! Fungible-token ledger
//!
//! A storage-backed ERC20-style ledger with:
//! - Balances per address, absent entries reading as zero
//! - Allowances for delegated transfers
//! - Transfer, delegated transfer, and approval operations
//! - A vestigial administrative owner role
//!
//! # Example
//!
//! ```ignore
//! use token_ledger::host::{CallContext, EventLog, MemoryStore};
//! use token_ledger::ledger::{Namespace, TokenLedger};
//!
//! let mut store = MemoryStore::new();
//! let mut events = EventLog::new();
//!
//! let ledger = TokenLedger::new(Namespace::new("token1"));
//! ledger.deploy(
//!     &mut store,
//!     &mut events,
//!     &CallContext::with_write_access("alice"),
//!     "alice", "My Token", "MTK", 8, 1_000_000,
//! )?;
//!
//! ledger.transfer(&mut store, &mut events, &CallContext::new("alice"), "bob", 1000)?;
//! assert_eq!(ledger.balance_of(&store, "bob")?, 1000);
//! ```

pub mod keys;
pub mod ledger;

pub use keys::Namespace;
pub use ledger::{LedgerError, TokenLedger};

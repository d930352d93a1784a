//! Bilateral atomic token swap
//!
//! Exchanges a fixed amount of one token against a fixed amount of another
//! between two parties, built from two delegated transfers. This is barter
//! with pre-agreed amounts, not price discovery.

pub mod coordinator;

pub use coordinator::{SwapCoordinator, SwapError};

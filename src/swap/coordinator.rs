//! Bilateral swap coordinator
//!
//! Composes two ledgers into a fixed barter: `amount_a` of token A moves from
//! one party to the other while `amount_b` of token B moves back. Both legs
//! are delegated transfers with the coordinator's identity as the spender, so
//! each party must have approved the coordinator on its own ledger first.
//!
//! Both legs commit or neither does: the coordinator proves both legs
//! feasible (allowance and balance, on both ledgers) before the first write,
//! and holds the exclusive store borrow for the whole call so nothing can
//! invalidate the checks in between.

use crate::host::{CallContext, EventSink, KeyValueStore};
use crate::ledger::{LedgerError, TokenLedger};
use thiserror::Error;

/// Swap errors
#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Caller lacks write access")]
    Unauthorized,
    #[error("Swap requires two distinct ledgers, got namespace {0} twice")]
    SameLedger(String),
    #[error("Swap leg on ledger {namespace} failed: {source}")]
    Leg {
        namespace: String,
        source: LedgerError,
    },
}

impl SwapError {
    fn leg(ledger: &TokenLedger, source: LedgerError) -> Self {
        Self::Leg {
            namespace: ledger.namespace().to_string(),
            source,
        }
    }
}

/// Coordinates bilateral swaps between two token ledgers.
///
/// The pair of ledgers is fixed at construction and the coordinator carries
/// no persistent state of its own. The two ledgers may have unrelated
/// metadata; the protocol is symmetric and type-agnostic.
#[derive(Clone, Debug)]
pub struct SwapCoordinator {
    ledger_a: TokenLedger,
    ledger_b: TokenLedger,
}

impl SwapCoordinator {
    /// Create a coordinator over two deployed ledgers.
    ///
    /// Requires a context with write access, mirroring ledger deployment.
    /// The two ledgers must have distinct namespaces: with shared entries the
    /// per-leg preflights would validate against the same allowance or
    /// balance twice, and the first leg could commit a decrement the second
    /// leg's failure cannot undo. Distinct namespaces cannot alias any key,
    /// so rejecting the pair here keeps the all-or-nothing guarantee intact.
    pub fn new(
        ctx: &CallContext,
        ledger_a: TokenLedger,
        ledger_b: TokenLedger,
    ) -> Result<Self, SwapError> {
        if !ctx.write_access {
            return Err(SwapError::Unauthorized);
        }
        if ledger_a.namespace() == ledger_b.namespace() {
            return Err(SwapError::SameLedger(ledger_a.namespace().to_string()));
        }
        Ok(Self { ledger_a, ledger_b })
    }

    /// The first ledger of the pair
    pub fn ledger_a(&self) -> &TokenLedger {
        &self.ledger_a
    }

    /// The second ledger of the pair
    pub fn ledger_b(&self) -> &TokenLedger {
        &self.ledger_b
    }

    /// Swap `amount_a` of token A from `addr_a` to `addr_b` against
    /// `amount_b` of token B from `addr_b` to `addr_a`.
    ///
    /// The caller acts as the spender on both ledgers: `addr_a` must have
    /// approved it for `amount_a` on ledger A and `addr_b` for `amount_b` on
    /// ledger B. Both legs are validated before either commits; on any
    /// failure every balance and allowance on both ledgers is left exactly
    /// as it was.
    pub fn swap<S: KeyValueStore, E: EventSink>(
        &self,
        store: &mut S,
        events: &mut E,
        ctx: &CallContext,
        addr_a: &str,
        amount_a: u64,
        addr_b: &str,
        amount_b: u64,
    ) -> Result<(), SwapError> {
        let spender = ctx.caller();

        // Prove both legs feasible before writing anything
        self.ledger_a
            .check_transfer_from(store, spender, addr_a, addr_b, amount_a)
            .map_err(|e| SwapError::leg(&self.ledger_a, e))?;
        self.ledger_b
            .check_transfer_from(store, spender, addr_b, addr_a, amount_b)
            .map_err(|e| SwapError::leg(&self.ledger_b, e))?;

        // The checks above guarantee these cannot fail; errors are still
        // propagated rather than unwrapped
        self.ledger_a
            .transfer_from(store, events, ctx, addr_a, addr_b, amount_a)
            .map_err(|e| SwapError::leg(&self.ledger_a, e))?;
        self.ledger_b
            .transfer_from(store, events, ctx, addr_b, addr_a, amount_b)
            .map_err(|e| SwapError::leg(&self.ledger_b, e))?;

        log::info!(
            "Swap committed: {} x{} ({} -> {}), {} x{} ({} -> {})",
            self.ledger_a.namespace(),
            amount_a,
            addr_a,
            addr_b,
            self.ledger_b.namespace(),
            amount_b,
            addr_b,
            addr_a,
        );

        Ok(())
    }
}

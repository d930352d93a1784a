//! Storage-backed fungible-token ledger
//!
//! One `TokenLedger` value is a lightweight handle over a namespace; all
//! state (metadata, balances, allowances, the administrative owner) lives in
//! the key-value store passed into each operation. Taking the store `&mut`
//! for every mutation gives each operation exclusive access for its whole
//! read-validate-write sequence: operations against one store never
//! interleave.
//!
//! Every mutating operation performs all of its validation before its first
//! storage write, so a failed operation leaves no partial state behind.

use crate::codec;
use crate::codec::CodecError;
use crate::host::events::{APPROVAL_EVENT, CHANGE_OWNER_EVENT, TRANSFER_EVENT};
use crate::host::{CallContext, Event, EventSink, KeyValueStore};
use crate::ledger::keys::Namespace;
use thiserror::Error;

/// Ledger errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Caller lacks write access")]
    Unauthorized,
    #[error("Ledger already deployed under namespace: {0}")]
    AlreadyDeployed(String),
    #[error("No ledger deployed under namespace: {0}")]
    NotDeployed(String),
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u64, need: u64 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: u64, need: u64 },
    #[error("Increasing allowance {current} by {amount} overflows")]
    AllowanceOverflow { current: u64, amount: u64 },
    #[error("Decreasing allowance {current} by {amount} underflows")]
    AllowanceUnderflow { current: u64, amount: u64 },
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Sender address reported in the genesis credit event
const GENESIS_SOURCE: &str = "";

/// A fungible-token ledger over one storage namespace.
///
/// Balances and allowances are u64 counters; an absent storage entry reads
/// as zero. The sum of all balances equals the total supply at all times:
/// the genesis credit at deployment is the only path that creates tokens,
/// and transfers only move them.
#[derive(Clone, Debug)]
pub struct TokenLedger {
    namespace: Namespace,
}

impl TokenLedger {
    /// Create a handle over the given namespace
    pub fn new(namespace: Namespace) -> Self {
        Self { namespace }
    }

    /// The ledger's namespace
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Whether this namespace holds a deployed ledger
    pub fn is_deployed(&self, store: &impl KeyValueStore) -> bool {
        store.has(&self.namespace.name_key())
    }

    /// Deploy the token: persist metadata, record the owner, and credit the
    /// entire supply to `creator`.
    ///
    /// Requires a context with write access. Fails if the namespace already
    /// holds a deployed ledger. This is the sole source of token supply.
    #[allow(clippy::too_many_arguments)]
    pub fn deploy<S: KeyValueStore, E: EventSink>(
        &self,
        store: &mut S,
        events: &mut E,
        ctx: &CallContext,
        creator: &str,
        name: &str,
        symbol: &str,
        decimals: u8,
        total_supply: u64,
    ) -> Result<(), LedgerError> {
        if !ctx.write_access {
            return Err(LedgerError::Unauthorized);
        }
        if self.is_deployed(store) {
            return Err(LedgerError::AlreadyDeployed(self.namespace.to_string()));
        }

        store.set(&self.namespace.name_key(), codec::encode_str(name));
        store.set(&self.namespace.symbol_key(), codec::encode_str(symbol));
        store.set(&self.namespace.decimals_key(), codec::encode_u8(decimals));
        store.set(
            &self.namespace.total_supply_key(),
            codec::encode_u64(total_supply),
        );

        self.set_owner(store, events, ctx, creator)?;
        self.set_balance(store, creator, total_supply);

        log::info!(
            "Ledger deployed: {} ({}) supply {} under namespace {}",
            name,
            symbol,
            total_supply,
            self.namespace
        );

        events.emit(Event::new(
            TRANSFER_EVENT,
            vec![
                GENESIS_SOURCE.to_string(),
                creator.to_string(),
                total_supply.to_string(),
            ],
        ));

        Ok(())
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Token name
    pub fn name(&self, store: &impl KeyValueStore) -> Result<String, LedgerError> {
        let bytes = self.require(store, &self.namespace.name_key())?;
        Ok(codec::decode_string(&bytes)?)
    }

    /// Token symbol
    pub fn symbol(&self, store: &impl KeyValueStore) -> Result<String, LedgerError> {
        let bytes = self.require(store, &self.namespace.symbol_key())?;
        Ok(codec::decode_string(&bytes)?)
    }

    /// Decimal places, stored and decoded as a single byte
    pub fn decimals(&self, store: &impl KeyValueStore) -> Result<u8, LedgerError> {
        let bytes = self.require(store, &self.namespace.decimals_key())?;
        Ok(codec::decode_u8(&bytes)?)
    }

    /// Total token supply, fixed at deployment
    pub fn total_supply(&self, store: &impl KeyValueStore) -> Result<u64, LedgerError> {
        let bytes = self.require(store, &self.namespace.total_supply_key())?;
        Ok(codec::decode_u64(&bytes)?)
    }

    /// Read a metadata value that must exist on a deployed ledger
    fn require(&self, store: &impl KeyValueStore, key: &[u8]) -> Result<Vec<u8>, LedgerError> {
        store
            .get(key)
            .ok_or_else(|| LedgerError::NotDeployed(self.namespace.to_string()))
    }

    // =========================================================================
    // Balances
    // =========================================================================

    /// Balance of an address; an absent entry is zero
    pub fn balance_of(
        &self,
        store: &impl KeyValueStore,
        address: &str,
    ) -> Result<u64, LedgerError> {
        match store.get(&self.namespace.balance_key(address)) {
            Some(bytes) => Ok(codec::decode_u64(&bytes)?),
            None => Ok(0),
        }
    }

    fn set_balance(&self, store: &mut impl KeyValueStore, address: &str, balance: u64) {
        store.set(&self.namespace.balance_key(address), codec::encode_u64(balance));
    }

    /// Validate a balance move without touching storage.
    ///
    /// Fails on source underflow or destination overflow. A self-move only
    /// needs the source check since the balance ends up unchanged.
    fn check_move(
        &self,
        store: &impl KeyValueStore,
        from: &str,
        to: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let from_balance = self.balance_of(store, from)?;
        if from_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: from_balance,
                need: amount,
            });
        }
        if from != to {
            let to_balance = self.balance_of(store, to)?;
            if to_balance.checked_add(amount).is_none() {
                return Err(LedgerError::InsufficientBalance {
                    have: u64::MAX - to_balance,
                    need: amount,
                });
            }
        }
        Ok(())
    }

    /// Move `amount` from one balance to another.
    ///
    /// All reads and checks happen before the two writes; the writes land as
    /// one unit under the exclusive store borrow, so no observer can see a
    /// half-applied move. A valid self-move leaves the balance untouched.
    fn move_balances(
        &self,
        store: &mut impl KeyValueStore,
        from: &str,
        to: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.check_move(store, from, to, amount)?;
        if from == to {
            return Ok(());
        }
        let from_balance = self.balance_of(store, from)?;
        let to_balance = self.balance_of(store, to)?;
        self.set_balance(store, from, from_balance - amount);
        self.set_balance(store, to, to_balance + amount);
        Ok(())
    }

    /// Transfer `amount` from the caller's balance to `to`.
    ///
    /// Emits a `TRANSFER` event after the balances have been written.
    pub fn transfer<S: KeyValueStore, E: EventSink>(
        &self,
        store: &mut S,
        events: &mut E,
        ctx: &CallContext,
        to: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let from = ctx.caller();
        self.move_balances(store, from, to, amount)?;

        events.emit(Event::new(
            TRANSFER_EVENT,
            vec![from.to_string(), to.to_string(), amount.to_string()],
        ));
        Ok(())
    }

    /// Delegated transfer: the caller spends from `from`'s balance within the
    /// allowance `from` granted to the caller.
    ///
    /// The allowance check, the balance move, and the allowance decrement are
    /// one unit: all validation happens before the first write, and the
    /// decrement cannot fail once the checks have passed, so balances never
    /// move without the allowance shrinking or vice versa.
    pub fn transfer_from<S: KeyValueStore, E: EventSink>(
        &self,
        store: &mut S,
        events: &mut E,
        ctx: &CallContext,
        from: &str,
        to: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let spender = ctx.caller();

        let current = self.allowance(store, from, spender)?;
        if current < amount {
            return Err(LedgerError::InsufficientAllowance {
                have: current,
                need: amount,
            });
        }

        self.move_balances(store, from, to, amount)?;

        // Guaranteed not to underflow by the check above
        self.approve(store, events, from, spender, current - amount)?;

        events.emit(Event::new(
            TRANSFER_EVENT,
            vec![from.to_string(), to.to_string(), amount.to_string()],
        ));
        Ok(())
    }

    /// Validate a delegated transfer without mutating anything.
    ///
    /// Used by the swap coordinator to prove both legs feasible before
    /// committing either.
    pub(crate) fn check_transfer_from(
        &self,
        store: &impl KeyValueStore,
        spender: &str,
        from: &str,
        to: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let current = self.allowance(store, from, spender)?;
        if current < amount {
            return Err(LedgerError::InsufficientAllowance {
                have: current,
                need: amount,
            });
        }
        self.check_move(store, from, to, amount)
    }

    // =========================================================================
    // Allowances
    // =========================================================================

    /// Remaining amount `spender` may move out of `owner`'s balance
    pub fn allowance(
        &self,
        store: &impl KeyValueStore,
        owner: &str,
        spender: &str,
    ) -> Result<u64, LedgerError> {
        match store.get(&self.namespace.allowance_key(owner, spender)) {
            Some(bytes) => Ok(codec::decode_u64(&bytes)?),
            None => Ok(0),
        }
    }

    /// Raise the allowance the caller grants to `spender` by `amount`
    pub fn increase_allowance<S: KeyValueStore, E: EventSink>(
        &self,
        store: &mut S,
        events: &mut E,
        ctx: &CallContext,
        spender: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let owner = ctx.caller();
        let current = self.allowance(store, owner, spender)?;
        let new_allowance = current
            .checked_add(amount)
            .ok_or(LedgerError::AllowanceOverflow { current, amount })?;
        self.approve(store, events, owner, spender, new_allowance)
    }

    /// Lower the allowance the caller grants to `spender` by `amount`
    pub fn decrease_allowance<S: KeyValueStore, E: EventSink>(
        &self,
        store: &mut S,
        events: &mut E,
        ctx: &CallContext,
        spender: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let owner = ctx.caller();
        let current = self.allowance(store, owner, spender)?;
        if current < amount {
            return Err(LedgerError::AllowanceUnderflow { current, amount });
        }
        self.approve(store, events, owner, spender, current - amount)
    }

    /// Set the allowance entry to `amount` unconditionally.
    ///
    /// Shared primitive used by increase/decrease and by the delegated
    /// transfer's decrement step. Emits an `APPROVAL` event carrying the
    /// resulting value.
    pub fn approve<S: KeyValueStore, E: EventSink>(
        &self,
        store: &mut S,
        events: &mut E,
        owner: &str,
        spender: &str,
        amount: u64,
    ) -> Result<(), LedgerError> {
        store.set(
            &self.namespace.allowance_key(owner, spender),
            codec::encode_u64(amount),
        );

        events.emit(Event::new(
            APPROVAL_EVENT,
            vec![owner.to_string(), spender.to_string(), amount.to_string()],
        ));
        Ok(())
    }

    // =========================================================================
    // Administrative owner
    // =========================================================================

    /// Record `new_owner` as the contract administrator.
    ///
    /// Permitted while no owner is recorded, or when the caller is the
    /// current owner. The role gates nothing beyond its own reassignment.
    pub fn set_owner<S: KeyValueStore, E: EventSink>(
        &self,
        store: &mut S,
        events: &mut E,
        ctx: &CallContext,
        new_owner: &str,
    ) -> Result<(), LedgerError> {
        match self.owner_address(store)? {
            Some(owner) if owner != ctx.caller() => return Err(LedgerError::Unauthorized),
            _ => {}
        }

        store.set(&self.namespace.owner_key(), codec::encode_str(new_owner));
        log::info!("Ledger {} owner set to {}", self.namespace, new_owner);

        events.emit(Event::new(CHANGE_OWNER_EVENT, vec![new_owner.to_string()]));
        Ok(())
    }

    /// The recorded administrator, if any
    pub fn owner_address(
        &self,
        store: &impl KeyValueStore,
    ) -> Result<Option<String>, LedgerError> {
        match store.get(&self.namespace.owner_key()) {
            Some(bytes) => Ok(Some(codec::decode_string(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Whether `address` is the recorded administrator
    pub fn is_owner(
        &self,
        store: &impl KeyValueStore,
        address: &str,
    ) -> Result<bool, LedgerError> {
        Ok(self.owner_address(store)?.as_deref() == Some(address))
    }
}

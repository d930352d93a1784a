//! CLI command handlers
//!
//! Each handler operates on a file-backed store under the data directory and
//! saves the snapshot after every successful mutation.

use crate::host::{CallContext, EventLog, EventSink, FileStore, LogSink};
use crate::ledger::{Namespace, TokenLedger};
use crate::swap::SwapCoordinator;
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub store: FileStore,
    pub events: EventLog,
}

impl AppState {
    /// Open the store under `data_dir`, loading any existing snapshot
    pub fn open(data_dir: &Path) -> CliResult<Self> {
        let store = FileStore::open_dir(data_dir)?;
        if store.exists() {
            println!("📂 Loaded ledger store from {:?}", data_dir);
        } else {
            println!("🆕 Starting empty ledger store in {:?}", data_dir);
        }
        Ok(Self {
            store,
            events: EventLog::new(),
        })
    }

    /// Persist the store, then print the events the command produced and
    /// forward them to the log facade
    pub fn finish(&mut self) -> CliResult<()> {
        self.store.save()?;
        let mut sink = LogSink;
        for event in self.events.take() {
            println!("   📣 {} [{}]", event.name, event.fields.join(", "));
            sink.emit(event);
        }
        Ok(())
    }
}

/// Deploy a new token ledger
#[allow(clippy::too_many_arguments)]
pub fn cmd_deploy(
    state: &mut AppState,
    namespace: &str,
    caller: &str,
    name: &str,
    symbol: &str,
    decimals: u8,
    supply: u64,
) -> CliResult<()> {
    let ledger = TokenLedger::new(Namespace::new(namespace));
    ledger.deploy(
        &mut state.store,
        &mut state.events,
        &CallContext::with_write_access(caller),
        caller,
        name,
        symbol,
        decimals,
        supply,
    )?;

    println!("✅ Token deployed!");
    println!("   🏷️  {} ({}) with {} decimals", name, symbol, decimals);
    println!("   💰 Supply {} credited to {}", supply, caller);
    println!("   📁 Namespace: {}", namespace);

    state.finish()
}

/// Show a ledger's metadata
pub fn cmd_info(state: &mut AppState, namespace: &str) -> CliResult<()> {
    let ledger = TokenLedger::new(Namespace::new(namespace));

    println!("🪙  Ledger {}", namespace);
    println!("   ├─ Name: {}", ledger.name(&state.store)?);
    println!("   ├─ Symbol: {}", ledger.symbol(&state.store)?);
    println!("   ├─ Decimals: {}", ledger.decimals(&state.store)?);
    println!("   ├─ Total supply: {}", ledger.total_supply(&state.store)?);
    match ledger.owner_address(&state.store)? {
        Some(owner) => println!("   └─ Owner: {}", owner),
        None => println!("   └─ Owner: (not set)"),
    }

    Ok(())
}

/// Show the balance of an address
pub fn cmd_balance(state: &mut AppState, namespace: &str, address: &str) -> CliResult<()> {
    let ledger = TokenLedger::new(Namespace::new(namespace));
    let balance = ledger.balance_of(&state.store, address)?;
    let symbol = ledger.symbol(&state.store)?;

    println!("💰 {} holds {} {}", address, balance, symbol);
    Ok(())
}

/// Transfer tokens from the caller to a recipient
pub fn cmd_transfer(
    state: &mut AppState,
    namespace: &str,
    caller: &str,
    to: &str,
    amount: u64,
) -> CliResult<()> {
    let ledger = TokenLedger::new(Namespace::new(namespace));
    ledger.transfer(
        &mut state.store,
        &mut state.events,
        &CallContext::new(caller),
        to,
        amount,
    )?;

    println!("✅ Transferred {} from {} to {}", amount, caller, to);
    state.finish()
}

/// Raise or lower the allowance the caller grants a spender
pub fn cmd_adjust_allowance(
    state: &mut AppState,
    namespace: &str,
    caller: &str,
    spender: &str,
    amount: u64,
    increase: bool,
) -> CliResult<()> {
    let ledger = TokenLedger::new(Namespace::new(namespace));
    let ctx = CallContext::new(caller);

    if increase {
        ledger.increase_allowance(&mut state.store, &mut state.events, &ctx, spender, amount)?;
        println!("✅ Allowance for {} raised by {}", spender, amount);
    } else {
        ledger.decrease_allowance(&mut state.store, &mut state.events, &ctx, spender, amount)?;
        println!("✅ Allowance for {} lowered by {}", spender, amount);
    }

    let remaining = ledger.allowance(&state.store, caller, spender)?;
    println!("   Now {} may spend {} from {}", spender, remaining, caller);
    state.finish()
}

/// Show the allowance an owner grants a spender
pub fn cmd_allowance(
    state: &mut AppState,
    namespace: &str,
    owner: &str,
    spender: &str,
) -> CliResult<()> {
    let ledger = TokenLedger::new(Namespace::new(namespace));
    let allowance = ledger.allowance(&state.store, owner, spender)?;

    println!("🔏 {} may spend {} from {}", spender, allowance, owner);
    Ok(())
}

/// Execute a bilateral swap across two ledgers
#[allow(clippy::too_many_arguments)]
pub fn cmd_swap(
    state: &mut AppState,
    namespace_a: &str,
    namespace_b: &str,
    caller: &str,
    addr_a: &str,
    amount_a: u64,
    addr_b: &str,
    amount_b: u64,
) -> CliResult<()> {
    let coordinator = SwapCoordinator::new(
        &CallContext::with_write_access(caller),
        TokenLedger::new(Namespace::new(namespace_a)),
        TokenLedger::new(Namespace::new(namespace_b)),
    )?;

    coordinator.swap(
        &mut state.store,
        &mut state.events,
        &CallContext::new(caller),
        addr_a,
        amount_a,
        addr_b,
        amount_b,
    )?;

    println!("✅ Swap completed!");
    println!("   {} x{}: {} -> {}", namespace_a, amount_a, addr_a, addr_b);
    println!("   {} x{}: {} -> {}", namespace_b, amount_b, addr_b, addr_a);
    state.finish()
}

//! Token Ledger CLI Application
//!
//! A command-line interface for deploying token ledgers, moving balances,
//! managing allowances, and executing bilateral swaps.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use token_ledger::cli::commands::{
    cmd_adjust_allowance, cmd_allowance, cmd_balance, cmd_deploy, cmd_info, cmd_swap,
    cmd_transfer, AppState,
};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(version = "0.1.0")]
#[command(about = "A storage-backed token ledger with bilateral swaps", long_about = None)]
struct Cli {
    /// Data directory for the ledger store
    #[arg(short, long, default_value = ".ledger_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a new token ledger
    Deploy {
        /// Storage namespace for the new ledger
        #[arg(short, long)]
        namespace: String,

        /// Deploying address (receives the full supply)
        #[arg(short, long)]
        caller: String,

        /// Token name
        #[arg(long)]
        name: String,

        /// Token symbol
        #[arg(long)]
        symbol: String,

        /// Decimal places
        #[arg(long, default_value = "8")]
        decimals: u8,

        /// Total supply
        #[arg(long)]
        supply: u64,
    },

    /// Show a ledger's metadata
    Info {
        #[arg(short, long)]
        namespace: String,
    },

    /// Show the balance of an address
    Balance {
        #[arg(short, long)]
        namespace: String,

        #[arg(short, long)]
        address: String,
    },

    /// Transfer tokens from the caller to a recipient
    Transfer {
        #[arg(short, long)]
        namespace: String,

        /// Sending address
        #[arg(short, long)]
        caller: String,

        /// Recipient address
        #[arg(short, long)]
        to: String,

        #[arg(short, long)]
        amount: u64,
    },

    /// Raise the allowance the caller grants a spender
    IncreaseAllowance {
        #[arg(short, long)]
        namespace: String,

        /// Granting address
        #[arg(short, long)]
        caller: String,

        /// Spender address
        #[arg(short, long)]
        spender: String,

        #[arg(short, long)]
        amount: u64,
    },

    /// Lower the allowance the caller grants a spender
    DecreaseAllowance {
        #[arg(short, long)]
        namespace: String,

        /// Granting address
        #[arg(short, long)]
        caller: String,

        /// Spender address
        #[arg(short, long)]
        spender: String,

        #[arg(short, long)]
        amount: u64,
    },

    /// Show the allowance an owner grants a spender
    Allowance {
        #[arg(short, long)]
        namespace: String,

        #[arg(short, long)]
        owner: String,

        #[arg(short, long)]
        spender: String,
    },

    /// Swap tokens between two ledgers
    Swap {
        /// Namespace of the first ledger
        #[arg(long)]
        ledger_a: String,

        /// Namespace of the second ledger
        #[arg(long)]
        ledger_b: String,

        /// Coordinator identity (must hold allowances on both ledgers)
        #[arg(short, long)]
        caller: String,

        /// Party giving tokens on the first ledger
        #[arg(long)]
        addr_a: String,

        /// Amount moving on the first ledger
        #[arg(long)]
        amount_a: u64,

        /// Party giving tokens on the second ledger
        #[arg(long)]
        addr_b: String,

        /// Amount moving on the second ledger
        #[arg(long)]
        amount_b: u64,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut state = match AppState::open(&cli.data_dir) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to open ledger store: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Deploy {
            namespace,
            caller,
            name,
            symbol,
            decimals,
            supply,
        } => cmd_deploy(
            &mut state, &namespace, &caller, &name, &symbol, decimals, supply,
        ),
        Commands::Info { namespace } => cmd_info(&mut state, &namespace),
        Commands::Balance { namespace, address } => cmd_balance(&mut state, &namespace, &address),
        Commands::Transfer {
            namespace,
            caller,
            to,
            amount,
        } => cmd_transfer(&mut state, &namespace, &caller, &to, amount),
        Commands::IncreaseAllowance {
            namespace,
            caller,
            spender,
            amount,
        } => cmd_adjust_allowance(&mut state, &namespace, &caller, &spender, amount, true),
        Commands::DecreaseAllowance {
            namespace,
            caller,
            spender,
            amount,
        } => cmd_adjust_allowance(&mut state, &namespace, &caller, &spender, amount, false),
        Commands::Allowance {
            namespace,
            owner,
            spender,
        } => cmd_allowance(&mut state, &namespace, &owner, &spender),
        Commands::Swap {
            ledger_a,
            ledger_b,
            caller,
            addr_a,
            amount_a,
            addr_b,
            amount_b,
        } => cmd_swap(
            &mut state, &ledger_a, &ledger_b, &caller, &addr_a, amount_a, &addr_b, amount_b,
        ),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

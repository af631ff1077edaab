#![forbid(unsafe_code)]
//! Manage accounts in the ledger snapshot

use clap::{Parser, Subcommand};
use colored::*;
use microledger::account::{generate_address, Tier};
use microledger::config::load_config;
use microledger::persistence::LedgerSnapshot;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    New {
        /// Address to register; generated when omitted
        #[arg(long)]
        address: Option<String>,
        /// Opening balance in the smallest currency unit
        #[arg(long, default_value_t = 0)]
        balance: u64,
        /// Account tier: basic, standard, or premium
        #[arg(long, default_value = "basic")]
        tier: Tier,
    },
    /// Freeze an account so it can no longer send
    Freeze { address: String },
    /// Unfreeze a frozen account
    Unfreeze { address: String },
    /// Change an account's tier
    Tier { address: String, tier: Tier },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = load_config()?;
    let mut snapshot = LedgerSnapshot::load_or_default(&config.storage.path)?;

    match cli.command {
        Commands::New {
            address,
            balance,
            tier,
        } => {
            let address = address.unwrap_or_else(generate_address);
            snapshot.ledger.create_account(&address, balance, tier)?;
            println!("{}", "Account created".bright_green());
            println!("  Address: {}", address.bright_white());
            println!("  Balance: {}", balance.to_string().bright_white());
            println!("  Tier:    {}", tier.to_string().bright_white());
        }
        Commands::Freeze { address } => {
            snapshot.ledger.freeze(&address)?;
            println!("{} {}", "Frozen:".bright_yellow(), address);
        }
        Commands::Unfreeze { address } => {
            snapshot.ledger.unfreeze(&address)?;
            println!("{} {}", "Unfrozen:".bright_green(), address);
        }
        Commands::Tier { address, tier } => {
            snapshot.ledger.set_tier(&address, tier)?;
            println!("{} {} -> {}", "Tier updated:".bright_green(), address, tier);
        }
    }

    snapshot.save(&config.storage.path)?;
    Ok(())
}

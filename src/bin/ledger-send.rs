#![forbid(unsafe_code)]
//! Submit a transfer against the ledger snapshot

use clap::Parser;
use colored::*;
use microledger::config::load_config;
use microledger::persistence::LedgerSnapshot;
use microledger::transaction::{SubmitResult, TransferRequest};
use microledger::validator::Validator;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sender address
    sender: String,
    /// Recipient address
    recipient: String,
    /// Amount in the smallest currency unit
    amount: u64,
    /// Pay the surcharge for expedited processing
    #[arg(long)]
    priority: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = load_config()?;
    let snapshot = LedgerSnapshot::load_or_default(&config.storage.path)?;
    let validator = Validator::from_snapshot(snapshot, config.fees, config.validator);

    let request = TransferRequest::new(&cli.sender, &cli.recipient, cli.amount, cli.priority);
    let result = validator.submit(&request)?;

    match &result {
        SubmitResult::Applied { fee } => {
            println!("{}", "Transfer applied".bright_green().bold());
            println!("  Amount:       {}", cli.amount.to_string().bright_white());
            println!("  Base fee:     {}", fee.base_fee);
            println!(
                "  Tiered fee:   {} (x{} discount -> {})",
                fee.tiered_fee, fee.discount, fee.discounted_tiered_fee
            );
            println!("  Priority fee: {}", fee.priority_fee);
            println!("  Total fee:    {}", fee.total.to_string().bright_yellow());
        }
        SubmitResult::Rejected { reason } => {
            println!("{}", "Transfer rejected".bright_red().bold());
            println!("  Reason: {}", reason.to_string().bright_red());
        }
    }

    validator.snapshot().save(&config.storage.path)?;
    Ok(())
}

#![forbid(unsafe_code)]
//! View recent transfers from the ledger snapshot

use clap::Parser;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use microledger::config::load_config;
use microledger::persistence::LedgerSnapshot;
use microledger::transaction::TransferState;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Only show transfers involving this address
    #[arg(long)]
    address: Option<String>,
    /// Number of receipts to show
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config()?;
    let snapshot = LedgerSnapshot::load_or_default(&config.storage.path)?;

    let receipts: Vec<_> = match &cli.address {
        Some(address) => snapshot
            .receipts
            .iter()
            .filter(|r| &r.sender == address || &r.recipient == address)
            .collect(),
        None => snapshot.receipts.iter().collect(),
    };

    if receipts.is_empty() {
        println!("{}", "No transfers recorded.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Time", "Sender", "Recipient", "Amount", "Fee", "Outcome",
        ]);

    let skip = receipts.len().saturating_sub(cli.limit);
    for receipt in receipts.into_iter().skip(skip) {
        let outcome = match receipt.state {
            TransferState::Applied => "applied".to_string(),
            TransferState::Rejected => receipt
                .rejection
                .map(|r| r.to_string())
                .unwrap_or_else(|| "rejected".to_string()),
            other => format!("{:?}", other),
        };
        table.add_row(vec![
            Cell::new(&receipt.timestamp),
            Cell::new(&receipt.sender),
            Cell::new(&receipt.recipient),
            Cell::new(receipt.amount),
            Cell::new(
                receipt
                    .fee_total
                    .map(|f| f.to_string())
                    .unwrap_or_default(),
            ),
            Cell::new(outcome),
        ]);
    }

    println!("{table}");
    Ok(())
}

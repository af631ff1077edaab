#![forbid(unsafe_code)]
//! List all accounts in the ledger snapshot

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use microledger::config::load_config;
use microledger::persistence::LedgerSnapshot;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let snapshot = LedgerSnapshot::load_or_default(&config.storage.path)?;

    if snapshot.ledger.is_empty() {
        println!("{}", "Ledger is empty.".yellow());
        println!(
            "{}",
            "Run 'ledger-account new' to create an account.".yellow()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Address", "Balance", "Tier", "Frozen"]);

    let mut accounts: Vec<_> = snapshot.ledger.accounts().collect();
    accounts.sort_by(|a, b| a.address.cmp(&b.address));
    for account in accounts {
        table.add_row(vec![
            Cell::new(&account.address),
            Cell::new(account.balance),
            Cell::new(account.tier),
            Cell::new(if account.frozen { "yes" } else { "" }),
        ]);
    }

    println!("{table}");
    println!(
        "{} {}",
        "Total balance:".bright_cyan(),
        snapshot.ledger.total_balance()
    );
    Ok(())
}

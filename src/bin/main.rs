#![forbid(unsafe_code)]

use colored::*;

fn main() {
    println!("{}", "microledger CLI".bright_cyan().bold());
    println!("{}", "---------------".bright_cyan());
    println!();
    println!(
        "{}",
        "This is the main entry point, but most functionality is in separate binaries.".yellow()
    );
    println!(
        "{}",
        "Use 'cargo run --bin <binary_name>' to run a specific command.".yellow()
    );
    println!();
    println!("{}", "Available binaries:".bright_green().underline());
    println!("  - {}", "ledger-account".bright_white());
    println!("  - {}", "ledger-send".bright_white());
    println!("  - {}", "ledger-balance".bright_white());
    println!("  - {}", "ledger-history".bright_white());
    println!();
    println!("{}", "Example:".bright_green().underline());
    println!(
        "{}",
        "  cargo run --bin ledger-send -- <sender> <recipient> 500000 --priority".italic()
    );
}

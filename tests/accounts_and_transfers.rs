//! Integration tests for account management and transfer submission

use microledger::account::Tier;
use microledger::fees::FeePolicy;
use microledger::ledger::Ledger;
use microledger::persistence::LedgerSnapshot;
use microledger::transaction::{RejectionCode, TransferRequest, ValidatorPolicy};
use microledger::validator::Validator;
use tempfile::TempDir;

const ALICE: &str = "ALICE12345678901234";
const BOB: &str = "BOB123456789012345";
const CAROL: &str = "CAROL1234567890123";

/// Helper to build a ledger with one funded sender
fn ledger_with_sender(balance: u64, tier: Tier) -> Result<Ledger, Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new();
    ledger.create_account(ALICE, balance, tier)?;
    Ok(ledger)
}

#[test]
fn test_valid_transfer_postconditions() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = ledger_with_sender(2_000_000, Tier::Standard)?;
    ledger.create_account(BOB, 10_000, Tier::Basic)?;
    let validator = Validator::with_defaults(ledger);

    let sender_before = validator.ledger().get_balance(ALICE)?;
    let recipient_before = validator.ledger().get_balance(BOB)?;

    let request = TransferRequest::new(ALICE, BOB, 250_000, false);
    let result = validator.submit(&request)?;
    let fee_total = result.fee_total().expect("transfer should be applied");

    let sender_after = validator.ledger().get_balance(ALICE)?;
    let recipient_after = validator.ledger().get_balance(BOB)?;

    assert_eq!(sender_after + 250_000 + fee_total, sender_before);
    assert_eq!(recipient_after, recipient_before + 250_000);
    Ok(())
}

#[test]
fn test_premium_priority_reference_transfer() -> Result<(), Box<dyn std::error::Error>> {
    // PREMIUM sender, balance 1,000,000, amount 500,000, priority:
    // tiered 500 * 0.5 = 250, surcharge 2000, total 3250
    let ledger = ledger_with_sender(1_000_000, Tier::Premium)?;
    let validator = Validator::with_defaults(ledger);

    let request = TransferRequest::new(ALICE, BOB, 500_000, true);
    let result = validator.submit(&request)?;
    assert_eq!(result.fee_total(), Some(3_250));
    assert_eq!(
        validator.ledger().get_balance(ALICE)?,
        1_000_000 - 500_000 - 3_250
    );
    Ok(())
}

#[test]
fn test_fee_alone_can_push_over_balance() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = ledger_with_sender(500, Tier::Basic)?;
    let validator = Validator::with_defaults(ledger);

    let request = TransferRequest::new(ALICE, BOB, 500, false);
    let result = validator.submit(&request)?;
    assert_eq!(result.rejection(), Some(RejectionCode::InsufficientFunds));
    Ok(())
}

#[test]
fn test_rejected_transfer_leaves_ledger_identical() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = ledger_with_sender(5_000, Tier::Basic)?;
    ledger.create_account(BOB, 1_000, Tier::Premium)?;
    ledger.freeze(BOB)?;
    let before = ledger.clone();
    let validator = Validator::with_defaults(ledger);

    let rejections = [
        TransferRequest::new(ALICE, ALICE, 100, false), // self transfer
        TransferRequest::new(ALICE, BOB, 0, false),     // invalid amount
        TransferRequest::new(ALICE, "short", 100, false), // malformed recipient
        TransferRequest::new(ALICE, BOB, 1_000_000, false), // insufficient
        TransferRequest::new(BOB, ALICE, 100, false),   // frozen sender
        TransferRequest::new(CAROL, ALICE, 100, false), // unknown sender
    ];
    for request in &rejections {
        let result = validator.submit(request)?;
        assert!(result.rejection().is_some(), "expected rejection: {:?}", request);
    }

    assert_eq!(*validator.ledger(), before);
    Ok(())
}

#[test]
fn test_self_transfer_rejected_regardless_of_balance() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = ledger_with_sender(u64::MAX / 2, Tier::Premium)?;
    let validator = Validator::with_defaults(ledger);

    let request = TransferRequest::new(ALICE, ALICE, 100, false);
    let result = validator.submit(&request)?;
    assert_eq!(result.rejection(), Some(RejectionCode::SelfTransfer));
    Ok(())
}

#[test]
fn test_zero_amount_rejected_before_ledger_access() -> Result<(), Box<dyn std::error::Error>> {
    // An empty ledger: a structural rejection must not even notice that the
    // sender does not exist
    let validator = Validator::with_defaults(Ledger::new());
    let request = TransferRequest::new(ALICE, BOB, 0, false);
    let result = validator.submit(&request)?;
    assert_eq!(result.rejection(), Some(RejectionCode::InvalidAmount));
    assert!(validator.ledger().is_empty());
    Ok(())
}

#[test]
fn test_recipient_auto_provisioned() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = ledger_with_sender(100_000, Tier::Basic)?;
    let validator = Validator::with_defaults(ledger);

    let request = TransferRequest::new(ALICE, BOB, 50_000, false);
    assert!(validator.submit(&request)?.is_applied());

    let ledger = validator.ledger();
    let bob = ledger.get_account(BOB).expect("recipient should exist");
    assert_eq!(bob.balance, 50_000);
    assert_eq!(bob.tier, Tier::Basic);
    Ok(())
}

#[test]
fn test_strict_recipient_policy() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = ledger_with_sender(100_000, Tier::Basic)?;
    let validator = Validator::new(
        ledger,
        FeePolicy::default(),
        ValidatorPolicy {
            auto_provision_recipient: false,
            ..Default::default()
        },
    );

    let request = TransferRequest::new(ALICE, BOB, 50_000, false);
    let result = validator.submit(&request)?;
    assert_eq!(result.rejection(), Some(RejectionCode::AccountNotFound));
    Ok(())
}

#[test]
fn test_transfer_amount_cap() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = ledger_with_sender(10_000_000, Tier::Basic)?;
    let validator = Validator::new(
        ledger,
        FeePolicy::default(),
        ValidatorPolicy {
            max_transfer_amount: Some(1_000_000),
            ..Default::default()
        },
    );

    let over = TransferRequest::new(ALICE, BOB, 1_000_001, false);
    assert_eq!(
        validator.submit(&over)?.rejection(),
        Some(RejectionCode::AmountOverLimit)
    );
    let within = TransferRequest::new(ALICE, BOB, 1_000_000, false);
    assert!(validator.submit(&within)?.is_applied());
    Ok(())
}

#[test]
fn test_history_records_applied_and_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = ledger_with_sender(100_000, Tier::Basic)?;
    let validator = Validator::with_defaults(ledger);

    validator.submit(&TransferRequest::new(ALICE, BOB, 10_000, false))?;
    validator.submit(&TransferRequest::new(ALICE, ALICE, 10_000, false))?;

    let history = validator.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history.for_address(BOB).count(), 1);
    Ok(())
}

#[test]
fn test_snapshot_round_trip_through_validator() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("ledger.json");

    let ledger = ledger_with_sender(1_000_000, Tier::Premium)?;
    let validator = Validator::with_defaults(ledger);
    validator.submit(&TransferRequest::new(ALICE, BOB, 500_000, true))?;
    validator.snapshot().save(&path)?;

    let restored = Validator::from_snapshot(
        LedgerSnapshot::load(&path)?,
        FeePolicy::default(),
        ValidatorPolicy::default(),
    );
    assert_eq!(
        restored.ledger().get_balance(ALICE)?,
        1_000_000 - 500_000 - 3_250
    );
    assert_eq!(restored.ledger().get_balance(BOB)?, 500_000);
    assert_eq!(restored.history().len(), 1);
    Ok(())
}

#[test]
fn test_total_balance_grows_only_by_minted_funds() -> Result<(), Box<dyn std::error::Error>> {
    // Transfers never create money: total balance only decreases by fees
    let ledger = ledger_with_sender(1_000_000, Tier::Basic)?;
    let validator = Validator::with_defaults(ledger);
    let before = validator.ledger().total_balance();

    let result = validator.submit(&TransferRequest::new(ALICE, BOB, 200_000, false))?;
    let fee_total = result.fee_total().expect("applied") as u128;

    assert_eq!(validator.ledger().total_balance(), before - fee_total);
    Ok(())
}

//! Transaction validator
//!
//! Drives a submitted transfer through RECEIVED -> VALIDATED -> APPLIED or
//! REJECTED. The validator is the only owner of the ledger; a single lock
//! guards the whole map so the balance-check-then-mutate sequence is atomic
//! with respect to concurrent submits.

use crate::account::Tier;
use crate::error::LedgerError;
use crate::fees::{self, FeePolicy};
use crate::history::{Receipt, TransferLog};
use crate::ledger::Ledger;
use crate::persistence::LedgerSnapshot;
use crate::transaction::{RejectionCode, SubmitResult, TransferRequest, ValidatorPolicy};
use parking_lot::{Mutex, MutexGuard};
use tracing::{info, warn};

pub struct Validator {
    ledger: Mutex<Ledger>,
    log: Mutex<TransferLog>,
    fees: FeePolicy,
    policy: ValidatorPolicy,
}

impl Validator {
    pub fn new(ledger: Ledger, fees: FeePolicy, policy: ValidatorPolicy) -> Self {
        Validator {
            ledger: Mutex::new(ledger),
            log: Mutex::new(TransferLog::new()),
            fees,
            policy,
        }
    }

    /// Validator over an existing ledger with the reference fee schedule
    pub fn with_defaults(ledger: Ledger) -> Self {
        Self::new(ledger, FeePolicy::default(), ValidatorPolicy::default())
    }

    pub fn from_snapshot(
        snapshot: LedgerSnapshot,
        fees: FeePolicy,
        policy: ValidatorPolicy,
    ) -> Self {
        let mut log = TransferLog::new();
        for receipt in snapshot.receipts {
            log.push(receipt);
        }
        Validator {
            ledger: Mutex::new(snapshot.ledger),
            log: Mutex::new(log),
            fees,
            policy,
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            ledger: self.ledger.lock().clone(),
            receipts: self.log.lock().iter().cloned().collect(),
        }
    }

    /// Direct access to the owned ledger. The guard serializes against
    /// in-flight submits.
    pub fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock()
    }

    pub fn history(&self) -> MutexGuard<'_, TransferLog> {
        self.log.lock()
    }

    /// Submit a transfer. Business rejections come back as
    /// [`SubmitResult::Rejected`]; an `Err` means a programming-error-class
    /// condition (e.g. a balance overflow) and never a normal decline.
    pub fn submit(&self, request: &TransferRequest) -> Result<SubmitResult, LedgerError> {
        // RECEIVED: structural checks, no ledger access
        if let Err(reason) = request.validate(&self.policy) {
            return Ok(self.reject(request, reason));
        }

        let mut ledger = self.ledger.lock();

        // VALIDATED: sender lookup, freeze check, fee quote, funds check
        let (sender_balance, sender_tier) = match ledger.get_account(&request.sender) {
            Some(account) if account.frozen => {
                return Ok(self.reject(request, RejectionCode::AccountFrozen));
            }
            Some(account) => (account.balance, account.tier),
            None => return Ok(self.reject(request, RejectionCode::AccountNotFound)),
        };

        let fee = match fees::quote(request.amount, sender_tier, request.priority, &self.fees) {
            Ok(fee) => fee,
            Err(_) => return Ok(self.reject(request, RejectionCode::InvalidAmount)),
        };

        let required = match request.amount.checked_add(fee.total) {
            Some(required) if sender_balance >= required => required,
            // An unpayable total, overflowing or not, is a plain decline
            _ => return Ok(self.reject(request, RejectionCode::InsufficientFunds)),
        };

        // APPLIED: debit sender, credit recipient, one atomic unit under the
        // ledger lock. The recipient credit is pre-checked for overflow so
        // that the pair of mutations cannot half-commit.
        match ledger.get_account(&request.recipient) {
            Some(account) => {
                if account.balance.checked_add(request.amount).is_none() {
                    return Err(LedgerError::BalanceOverflow(request.recipient.clone()));
                }
            }
            None if self.policy.auto_provision_recipient => {
                ledger.create_account(&request.recipient, 0, Tier::Basic)?;
            }
            None => return Ok(self.reject(request, RejectionCode::AccountNotFound)),
        }

        let debit = i64::try_from(required)
            .map_err(|_| LedgerError::BalanceOverflow(request.sender.clone()))?;
        let credit = i64::try_from(request.amount)
            .map_err(|_| LedgerError::BalanceOverflow(request.recipient.clone()))?;

        ledger.apply_delta(&request.sender, -debit)?;
        if let Err(err) = ledger.apply_delta(&request.recipient, credit) {
            // Restore the sender so no partial transfer is ever visible
            ledger.apply_delta(&request.sender, debit)?;
            return Err(err);
        }
        drop(ledger);

        info!(
            sender = %request.sender,
            recipient = %request.recipient,
            amount = request.amount,
            fee_total = fee.total,
            "transfer applied"
        );
        self.log.lock().push(Receipt::applied(request, fee.total));
        Ok(SubmitResult::Applied { fee })
    }

    fn reject(&self, request: &TransferRequest, reason: RejectionCode) -> SubmitResult {
        warn!(
            sender = %request.sender,
            recipient = %request.recipient,
            amount = request.amount,
            %reason,
            "transfer rejected"
        );
        self.log.lock().push(Receipt::rejected(request, reason));
        SubmitResult::Rejected { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "ALICE12345678901234";
    const BOB: &str = "BOB123456789012345";

    fn validator_with(balance: u64, tier: Tier) -> Validator {
        let mut ledger = Ledger::new();
        ledger.create_account(ALICE, balance, tier).unwrap();
        Validator::with_defaults(ledger)
    }

    #[test]
    fn test_applied_transfer_postconditions() {
        let validator = validator_with(1_000_000, Tier::Premium);
        let request = TransferRequest::new(ALICE, BOB, 500_000, true);
        let result = validator.submit(&request).unwrap();
        assert_eq!(result.fee_total(), Some(3_250));

        let ledger = validator.ledger();
        assert_eq!(ledger.get_balance(ALICE).unwrap(), 1_000_000 - 500_000 - 3_250);
        assert_eq!(ledger.get_balance(BOB).unwrap(), 500_000);
    }

    #[test]
    fn test_fee_pushes_requirement_over_balance() {
        let validator = validator_with(500, Tier::Basic);
        let request = TransferRequest::new(ALICE, BOB, 500, false);
        let result = validator.submit(&request).unwrap();
        assert_eq!(result.rejection(), Some(RejectionCode::InsufficientFunds));
        assert_eq!(validator.ledger().get_balance(ALICE).unwrap(), 500);
    }

    #[test]
    fn test_frozen_sender_rejected() {
        let validator = validator_with(1_000_000, Tier::Basic);
        validator.ledger().freeze(ALICE).unwrap();
        let request = TransferRequest::new(ALICE, BOB, 100, false);
        let result = validator.submit(&request).unwrap();
        assert_eq!(result.rejection(), Some(RejectionCode::AccountFrozen));
    }

    #[test]
    fn test_unknown_recipient_rejected_without_auto_provision() {
        let mut ledger = Ledger::new();
        ledger.create_account(ALICE, 1_000_000, Tier::Basic).unwrap();
        let validator = Validator::new(
            ledger,
            FeePolicy::default(),
            ValidatorPolicy {
                auto_provision_recipient: false,
                ..Default::default()
            },
        );
        let request = TransferRequest::new(ALICE, BOB, 100, false);
        let result = validator.submit(&request).unwrap();
        assert_eq!(result.rejection(), Some(RejectionCode::AccountNotFound));
        assert!(!validator.ledger().contains(BOB));
        assert_eq!(validator.ledger().get_balance(ALICE).unwrap(), 1_000_000);
    }

    #[test]
    fn test_auto_provisioned_recipient_starts_at_zero_plus_amount() {
        let validator = validator_with(1_000_000, Tier::Basic);
        let request = TransferRequest::new(ALICE, BOB, 2_000, false);
        assert!(validator.submit(&request).unwrap().is_applied());
        let ledger = validator.ledger();
        let bob = ledger.get_account(BOB).unwrap();
        assert_eq!(bob.balance, 2_000);
        assert_eq!(bob.tier, Tier::Basic);
        assert!(!bob.frozen);
    }

    #[test]
    fn test_every_submit_leaves_a_receipt() {
        let validator = validator_with(1_000_000, Tier::Basic);
        validator
            .submit(&TransferRequest::new(ALICE, BOB, 2_000, false))
            .unwrap();
        validator
            .submit(&TransferRequest::new(ALICE, ALICE, 2_000, false))
            .unwrap();
        assert_eq!(validator.history().len(), 2);
    }

    #[test]
    fn test_recipient_overflow_is_an_error_not_a_rejection() {
        let mut ledger = Ledger::new();
        ledger.create_account(ALICE, 10_000, Tier::Basic).unwrap();
        ledger.create_account(BOB, u64::MAX, Tier::Basic).unwrap();
        let validator = Validator::with_defaults(ledger);
        let request = TransferRequest::new(ALICE, BOB, 100, false);
        let result = validator.submit(&request);
        assert!(matches!(result, Err(LedgerError::BalanceOverflow(_))));
        // Neither side mutated
        let ledger = validator.ledger();
        assert_eq!(ledger.get_balance(ALICE).unwrap(), 10_000);
        assert_eq!(ledger.get_balance(BOB).unwrap(), u64::MAX);
    }
}

/// Transfer request and result types
use crate::account::Address;
use crate::fees::FeeQuote;
use serde::{Deserialize, Serialize};

/// A proposed transfer. Immutable once constructed; not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: Address,
    pub recipient: Address,
    /// Amount in the smallest currency unit, must be greater than zero
    pub amount: u64,
    /// Expedited processing, charged a surcharge
    pub priority: bool,
}

impl TransferRequest {
    pub fn new(sender: &str, recipient: &str, amount: u64, priority: bool) -> Self {
        TransferRequest {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
            priority,
        }
    }
}

/// Why a transfer was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCode {
    InvalidAmount,
    InvalidAddress,
    SelfTransfer,
    AccountNotFound,
    AccountFrozen,
    InsufficientFunds,
    AmountOverLimit,
}

impl std::fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RejectionCode::InvalidAmount => write!(f, "Invalid amount"),
            RejectionCode::InvalidAddress => write!(f, "Invalid address"),
            RejectionCode::SelfTransfer => write!(f, "Cannot send to yourself"),
            RejectionCode::AccountNotFound => write!(f, "Account not found"),
            RejectionCode::AccountFrozen => write!(f, "Account is frozen"),
            RejectionCode::InsufficientFunds => write!(f, "Insufficient funds"),
            RejectionCode::AmountOverLimit => write!(f, "Amount exceeds limit"),
        }
    }
}

/// Lifecycle of one submitted transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferState {
    Received,
    Validated,
    Applied,
    Rejected,
}

/// Outcome of `Validator::submit`, tagged for callers and serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitResult {
    Applied { fee: FeeQuote },
    Rejected { reason: RejectionCode },
}

impl SubmitResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, SubmitResult::Applied { .. })
    }

    pub fn fee_total(&self) -> Option<u64> {
        match self {
            SubmitResult::Applied { fee } => Some(fee.total),
            SubmitResult::Rejected { .. } => None,
        }
    }

    pub fn rejection(&self) -> Option<RejectionCode> {
        match self {
            SubmitResult::Applied { .. } => None,
            SubmitResult::Rejected { reason } => Some(*reason),
        }
    }
}

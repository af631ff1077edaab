//! Audit trail of submitted transfers
//!
//! Every submit, applied or rejected, leaves a receipt. The log is bounded;
//! when full, the oldest receipts are dropped first.

use crate::account::Address;
use crate::transaction::{RejectionCode, TransferRequest, TransferState};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const MAX_ENTRIES: usize = 10_000;

/// Record of one submitted transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub sender: Address,
    pub recipient: Address,
    pub amount: u64,
    pub priority: bool,
    /// Terminal state: `Applied` or `Rejected`
    pub state: TransferState,
    pub fee_total: Option<u64>,
    pub rejection: Option<RejectionCode>,
    /// RFC3339 timestamp of the submit
    pub timestamp: String,
}

impl Receipt {
    pub fn applied(request: &TransferRequest, fee_total: u64) -> Self {
        Receipt {
            sender: request.sender.clone(),
            recipient: request.recipient.clone(),
            amount: request.amount,
            priority: request.priority,
            state: TransferState::Applied,
            fee_total: Some(fee_total),
            rejection: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn rejected(request: &TransferRequest, reason: RejectionCode) -> Self {
        Receipt {
            sender: request.sender.clone(),
            recipient: request.recipient.clone(),
            amount: request.amount,
            priority: request.priority,
            state: TransferState::Rejected,
            fee_total: None,
            rejection: Some(reason),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Bounded, in-memory transfer log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferLog {
    receipts: VecDeque<Receipt>,
}

impl TransferLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, receipt: Receipt) {
        if self.receipts.len() == MAX_ENTRIES {
            self.receipts.pop_front();
        }
        self.receipts.push_back(receipt);
    }

    /// The most recent `n` receipts, newest last
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Receipt> {
        let skip = self.receipts.len().saturating_sub(n);
        self.receipts.iter().skip(skip)
    }

    /// Receipts that involve the given address as sender or recipient
    pub fn for_address<'a>(&'a self, address: &'a str) -> impl Iterator<Item = &'a Receipt> {
        self.receipts
            .iter()
            .filter(move |receipt| receipt.sender == address || receipt.recipient == address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Receipt> {
        self.receipts.iter()
    }

    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }
}

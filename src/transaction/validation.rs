/// Structural validation for transfer requests, separated from type definitions
use crate::account::validate_address;
use crate::transaction::types::{RejectionCode, TransferRequest};

/// Policy knobs for structural validation
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidatorPolicy {
    /// Create unknown recipients with a zero balance instead of rejecting
    #[serde(default = "default_auto_provision")]
    pub auto_provision_recipient: bool,
    /// Upper bound on the transfer amount, disabled when absent
    #[serde(default)]
    pub max_transfer_amount: Option<u64>,
}

fn default_auto_provision() -> bool {
    true
}

impl Default for ValidatorPolicy {
    fn default() -> Self {
        ValidatorPolicy {
            auto_provision_recipient: default_auto_provision(),
            max_transfer_amount: None,
        }
    }
}

impl TransferRequest {
    /// Stateless validation: checks amount, addresses, and the self-transfer
    /// rule. Performs no ledger access; any failure means the ledger was
    /// never touched.
    pub fn validate(&self, policy: &ValidatorPolicy) -> Result<(), RejectionCode> {
        if self.amount == 0 {
            return Err(RejectionCode::InvalidAmount);
        }
        if let Some(limit) = policy.max_transfer_amount {
            if self.amount > limit {
                return Err(RejectionCode::AmountOverLimit);
            }
        }
        if validate_address(&self.sender).is_err() {
            return Err(RejectionCode::InvalidAddress);
        }
        if validate_address(&self.recipient).is_err() {
            return Err(RejectionCode::InvalidAddress);
        }
        // Self-sends are rejected regardless of balance
        if self.sender == self.recipient {
            return Err(RejectionCode::SelfTransfer);
        }
        Ok(())
    }
}

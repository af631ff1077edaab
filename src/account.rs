//! Accounts and addresses
//!
//! Addresses are opaque strings; balances are held in the smallest currency
//! unit and can never go negative.

use crate::error::LedgerError;
use rand::Rng;
use serde::{Deserialize, Serialize};

// Constants for validation
pub const MIN_ADDRESS_LENGTH: usize = 10;
pub const MAX_ADDRESS_LENGTH: usize = 128;

/// Opaque account identifier
pub type Address = String;

/// Validate that an address is well-formed.
pub fn validate_address(address: &str) -> Result<(), LedgerError> {
    if address.trim() != address {
        return Err(LedgerError::InvalidAddress(
            "address has leading or trailing whitespace".to_string(),
        ));
    }
    if address.len() < MIN_ADDRESS_LENGTH {
        return Err(LedgerError::InvalidAddress(format!(
            "address must be at least {} characters, got {}",
            MIN_ADDRESS_LENGTH,
            address.len()
        )));
    }
    if address.len() > MAX_ADDRESS_LENGTH {
        return Err(LedgerError::InvalidAddress(format!(
            "address exceeds maximum length of {} characters",
            MAX_ADDRESS_LENGTH
        )));
    }
    if !address.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(LedgerError::InvalidAddress(
            "address must be ASCII alphanumeric".to_string(),
        ));
    }
    Ok(())
}

/// Generate a fresh random address (40 hex characters).
pub fn generate_address() -> Address {
    let bytes: [u8; 20] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Account classification affecting the fee discount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    #[default]
    Basic,
    Standard,
    Premium,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Tier::Basic => write!(f, "BASIC"),
            Tier::Standard => write!(f, "STANDARD"),
            Tier::Premium => write!(f, "PREMIUM"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BASIC" => Ok(Tier::Basic),
            "STANDARD" => Ok(Tier::Standard),
            "PREMIUM" => Ok(Tier::Premium),
            other => Err(LedgerError::ConfigError(format!(
                "Unknown tier: {}",
                other
            ))),
        }
    }
}

/// A single ledger account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    /// Balance in the smallest currency unit
    pub balance: u64,
    pub tier: Tier,
    #[serde(default)]
    pub frozen: bool,
}

impl Account {
    pub fn new(address: Address, balance: u64, tier: Tier) -> Self {
        Account {
            address,
            balance,
            tier,
            frozen: false,
        }
    }
}

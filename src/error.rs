//! Error types for microledger

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    AccountNotFound(String),
    DuplicateAccount(String),
    InvalidAddress(String),
    InvalidAmount(String),
    InsufficientFunds {
        address: String,
        balance: u64,
        required: u64,
    },
    BalanceOverflow(String),
    ConfigError(String),
    IoError(String),
    JsonError(String),
    TomlError(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerError::AccountNotFound(addr) => write!(f, "Account not found: {}", addr),
            LedgerError::DuplicateAccount(addr) => write!(f, "Account already exists: {}", addr),
            LedgerError::InvalidAddress(msg) => write!(f, "Invalid address: {}", msg),
            LedgerError::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),
            LedgerError::InsufficientFunds {
                address,
                balance,
                required,
            } => write!(
                f,
                "Insufficient funds for {}: balance {} but {} required",
                address, balance, required
            ),
            LedgerError::BalanceOverflow(addr) => {
                write!(f, "Balance overflow for account: {}", addr)
            }
            LedgerError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            LedgerError::IoError(msg) => write!(f, "IO error: {}", msg),
            LedgerError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            LedgerError::TomlError(msg) => write!(f, "TOML error: {}", msg),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::JsonError(err.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::TomlError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;

//! Balance ledger: the in-memory map of all accounts
//!
//! The ledger owns nothing but its account map and has no side effects
//! beyond it. Balance-changing operations either commit fully or leave the
//! stored balance unchanged.

use crate::account::{validate_address, Account, Address, Tier};
use crate::error::LedgerError;
use std::collections::HashMap;
use tracing::debug;

/// The set of all accounts, keyed by address
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Ledger {
    accounts: HashMap<Address, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account. Fails if the address is malformed or already present.
    pub fn create_account(
        &mut self,
        address: &str,
        initial_balance: u64,
        tier: Tier,
    ) -> Result<&Account, LedgerError> {
        validate_address(address)?;
        if self.accounts.contains_key(address) {
            return Err(LedgerError::DuplicateAccount(address.to_string()));
        }
        let account = Account::new(address.to_string(), initial_balance, tier);
        debug!(address, initial_balance, tier = %tier, "account created");
        Ok(self
            .accounts
            .entry(address.to_string())
            .or_insert(account))
    }

    pub fn get_account(&self, address: &str) -> Option<&Account> {
        self.accounts.get(address)
    }

    pub fn get_balance(&self, address: &str) -> Result<u64, LedgerError> {
        self.accounts
            .get(address)
            .map(|account| account.balance)
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))
    }

    /// Overwrite an account balance unconditionally.
    pub fn set_balance(&mut self, address: &str, new_balance: u64) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))?;
        account.balance = new_balance;
        Ok(())
    }

    /// Atomic read-modify-write of a balance. Returns the new balance.
    ///
    /// The stored balance is unchanged on any failure: a delta that would
    /// take the balance below zero fails with `InsufficientFunds`, one that
    /// would exceed `u64::MAX` fails with `BalanceOverflow`.
    pub fn apply_delta(&mut self, address: &str, delta: i64) -> Result<u64, LedgerError> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))?;
        let new_balance = match account.balance.checked_add_signed(delta) {
            Some(balance) => balance,
            None if delta < 0 => {
                return Err(LedgerError::InsufficientFunds {
                    address: address.to_string(),
                    balance: account.balance,
                    required: delta.unsigned_abs(),
                })
            }
            None => return Err(LedgerError::BalanceOverflow(address.to_string())),
        };
        account.balance = new_balance;
        debug!(address, delta, new_balance, "balance updated");
        Ok(new_balance)
    }

    pub fn freeze(&mut self, address: &str) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))?;
        account.frozen = true;
        Ok(())
    }

    pub fn unfreeze(&mut self, address: &str) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))?;
        account.frozen = false;
        Ok(())
    }

    pub fn set_tier(&mut self, address: &str, tier: Tier) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))?;
        account.tier = tier;
        Ok(())
    }

    pub fn contains(&self, address: &str) -> bool {
        self.accounts.contains_key(address)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Total of all balances, for conservation checks
    pub fn total_balance(&self) -> u128 {
        self.accounts
            .values()
            .map(|account| account.balance as u128)
            .sum()
    }
}

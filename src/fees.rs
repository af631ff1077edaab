//! Fee calculation
//!
//! Pure functions from (amount, tier, priority) to a fee quote. The policy
//! constants live in [`FeePolicy`] so they can be overridden from
//! `config.toml`; the defaults are the reference schedule.

use crate::account::Tier;
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};

/// Fee schedule. Amount brackets are inclusive of their lower bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeePolicy {
    /// Fixed charge applied to every transaction
    #[serde(default = "default_base_fee")]
    pub base_fee: u64,
    /// Amounts below this pay no tiered fee
    #[serde(default = "default_mid_amount_threshold")]
    pub mid_amount_threshold: u64,
    /// Amounts at or above this pay the high rate
    #[serde(default = "default_high_amount_threshold")]
    pub high_amount_threshold: u64,
    /// Rate for amounts in the middle bracket
    #[serde(default = "default_mid_rate")]
    pub mid_rate: f64,
    /// Rate for amounts in the top bracket
    #[serde(default = "default_high_rate")]
    pub high_rate: f64,
    /// Discount multiplier on the tiered fee for STANDARD accounts
    #[serde(default = "default_standard_discount")]
    pub standard_discount: f64,
    /// Discount multiplier on the tiered fee for PREMIUM accounts
    #[serde(default = "default_premium_discount")]
    pub premium_discount: f64,
    /// Priority surcharge, expressed in multiples of the base fee
    #[serde(default = "default_priority_multiplier")]
    pub priority_multiplier: u64,
}

fn default_base_fee() -> u64 {
    1_000
}

fn default_mid_amount_threshold() -> u64 {
    100_000
}

fn default_high_amount_threshold() -> u64 {
    1_000_000
}

fn default_mid_rate() -> f64 {
    0.001
}

fn default_high_rate() -> f64 {
    0.002
}

fn default_standard_discount() -> f64 {
    0.8
}

fn default_premium_discount() -> f64 {
    0.5
}

fn default_priority_multiplier() -> u64 {
    2
}

impl Default for FeePolicy {
    fn default() -> Self {
        FeePolicy {
            base_fee: default_base_fee(),
            mid_amount_threshold: default_mid_amount_threshold(),
            high_amount_threshold: default_high_amount_threshold(),
            mid_rate: default_mid_rate(),
            high_rate: default_high_rate(),
            standard_discount: default_standard_discount(),
            premium_discount: default_premium_discount(),
            priority_multiplier: default_priority_multiplier(),
        }
    }
}

impl FeePolicy {
    /// Discount multiplier applied to the tiered fee for the given tier
    pub fn discount_for(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Premium => self.premium_discount,
            Tier::Standard => self.standard_discount,
            Tier::Basic => 1.0,
        }
    }
}

/// Breakdown of the fee for one transaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub base_fee: u64,
    /// Amount-proportional fee before the tier discount
    pub tiered_fee: u64,
    /// Discount multiplier that was applied to the tiered fee
    pub discount: f64,
    /// Tiered fee after the discount, rounded half-up to the smallest unit
    pub discounted_tiered_fee: u64,
    pub priority_fee: u64,
    pub total: u64,
}

/// Round half-up to the smallest currency unit. Input is never negative.
fn round_half_up(value: f64) -> u64 {
    (value + 0.5).floor() as u64
}

/// Quote the fee for a transfer. Deterministic for given inputs.
pub fn quote(
    amount: u64,
    tier: Tier,
    priority: bool,
    policy: &FeePolicy,
) -> Result<FeeQuote, LedgerError> {
    if amount == 0 {
        return Err(LedgerError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }

    let tiered = if amount < policy.mid_amount_threshold {
        0.0
    } else if amount < policy.high_amount_threshold {
        amount as f64 * policy.mid_rate
    } else {
        amount as f64 * policy.high_rate
    };

    let discount = policy.discount_for(tier);
    let discounted_tiered_fee = round_half_up(tiered * discount);

    let priority_fee = if priority {
        policy.base_fee * policy.priority_multiplier
    } else {
        0
    };

    Ok(FeeQuote {
        base_fee: policy.base_fee,
        tiered_fee: round_half_up(tiered),
        discount,
        discounted_tiered_fee,
        priority_fee,
        total: policy.base_fee + discounted_tiered_fee + priority_fee,
    })
}

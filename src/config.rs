//! Configuration management for microledger

use crate::fees::FeePolicy;
use crate::transaction::ValidatorPolicy;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fees: FeePolicy,
    #[serde(default)]
    pub validator: ValidatorPolicy,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    "./ledger.json".to_string()
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = fs::read_to_string("config.toml").unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        // Sane defaults when config.toml is absent
        Config::default()
    } else {
        toml::from_str(&config_str)?
    };

    // Validate critical values
    if config.storage.path.is_empty() {
        return Err("storage.path must be set in config.toml".into());
    }

    for (name, value) in [
        ("fees.mid_rate", config.fees.mid_rate),
        ("fees.high_rate", config.fees.high_rate),
        ("fees.standard_discount", config.fees.standard_discount),
        ("fees.premium_discount", config.fees.premium_discount),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(format!("{} must be between 0 and 1", name).into());
        }
    }

    if config.fees.mid_amount_threshold >= config.fees.high_amount_threshold {
        return Err("fees.mid_amount_threshold must be below fees.high_amount_threshold".into());
    }

    Ok(config)
}

//! Snapshot persistence for the ledger
//!
//! State is saved as a JSON file. Writes go to a temporary file first and
//! are renamed into place so a crash mid-write cannot corrupt an existing
//! snapshot.

use crate::error::LedgerError;
use crate::history::Receipt;
use crate::ledger::Ledger;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Serializable state of a validator: the ledger plus its transfer log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub ledger: Ledger,
    #[serde(default)]
    pub receipts: Vec<Receipt>,
}

impl LedgerSnapshot {
    pub fn new(ledger: Ledger) -> Self {
        LedgerSnapshot {
            ledger,
            receipts: Vec::new(),
        }
    }

    /// Save the snapshot, replacing any previous one atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LedgerError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load the snapshot at `path`, or start empty if the file is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

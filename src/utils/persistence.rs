use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::ledger::{Party, Transaction};

/// Offline copy of one domain's fetched parties and transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize",
    deserialize = "K: DeserializeOwned"
))]
pub struct LedgerSnapshot<K> {
    pub parties: Vec<Party>,
    pub transactions: Vec<Transaction<K>>,
}

impl<K> Default for LedgerSnapshot<K> {
    fn default() -> Self {
        Self {
            parties: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot<K: Serialize>(
    snapshot: &LedgerSnapshot<K>,
    path: &Path,
) -> Result<(), LedgerError> {
    save_report(snapshot, path)
}

/// Loads a snapshot, returning structured errors on failure.
pub fn load_snapshot<K: DeserializeOwned>(path: &Path) -> Result<LedgerSnapshot<K>, LedgerError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Atomically writes any serialisable value (rollups, statements) as pretty JSON.
pub fn save_report<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    tracing::debug!(path = %path.display(), "wrote json file");
    Ok(())
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default file name of the durable ledger inside the data directory.
pub const DEFAULT_LEDGER_FILE: &str = "economy.json";

/// Location of the durable ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Directory holding the bot's data files.
    pub data_dir: PathBuf,
    /// File name of the ledger inside `data_dir`.
    pub file_name: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_name: DEFAULT_LEDGER_FILE.to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Full path of the ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

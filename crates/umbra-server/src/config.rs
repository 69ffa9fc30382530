use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use umbra_ledger::LedgerConfig;

use crate::error::{ServerError, ServerResult};

/// Dashboard server configuration, usually read from a TOML file.
///
/// Every field is optional in the file; missing fields take the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub ledger_file: String,
    pub records_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let ledger = LedgerConfig::default();
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: ledger.data_dir,
            ledger_file: ledger.file_name,
            records_file: "economy_records.json".to_string(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Ledger location derived from this config.
    pub fn ledger(&self) -> LedgerConfig {
        LedgerConfig {
            data_dir: self.data_dir.clone(),
            file_name: self.ledger_file.clone(),
        }
    }

    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(&self.records_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.ledger().ledger_path(), PathBuf::from("data/economy.json"));
        assert_eq!(c.records_path(), PathBuf::from("data/economy_records.json"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"
            data_dir = "/var/lib/umbra"
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.ledger_file, "economy.json");
        assert_eq!(
            c.ledger().ledger_path(),
            PathBuf::from("/var/lib/umbra/economy.json")
        );
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("umbra.toml");
        std::fs::write(&path, "records_file = \"stats.json\"\n").unwrap();
        let c = ServerConfig::load(&path).unwrap();
        assert_eq!(c.records_file, "stats.json");
    }
}

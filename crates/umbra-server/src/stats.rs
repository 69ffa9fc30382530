//! Stats aggregation for the dashboard.
//!
//! Balances come from the ledger through [`BalanceStore::balance`]. Income
//! and expense totals live in a separate economy-record file, a JSON array
//! of per-user objects keyed by `id`:
//!
//! ```text
//! [
//!   { "id": "123", "balance": 40, "ingresos": 120, "gastos": 80 }
//! ]
//! ```
//!
//! The `balance` field of that file is ignored; the ledger is authoritative.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use umbra_ledger::BalanceStore;
use umbra_types::{Balance, UserId};

use crate::error::{ServerError, ServerResult};

/// One entry of the economy-record file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyRecord {
    pub id: String,
    #[serde(default)]
    pub balance: Balance,
    #[serde(default)]
    pub ingresos: i64,
    #[serde(default)]
    pub gastos: i64,
}

/// Payload served for a single user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: UserId,
    pub balance: Balance,
    pub ingresos: i64,
    pub gastos: i64,
    pub neto: i64,
}

/// One row of the balance leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: UserId,
    pub balance: Balance,
}

/// Builds dashboard payloads from the ledger and the record file.
pub struct StatsAggregator {
    ledger: Arc<dyn BalanceStore>,
    records_path: PathBuf,
}

impl StatsAggregator {
    pub fn new(ledger: Arc<dyn BalanceStore>, records_path: impl Into<PathBuf>) -> Self {
        Self {
            ledger,
            records_path: records_path.into(),
        }
    }

    pub fn records_path(&self) -> &Path {
        &self.records_path
    }

    /// Read the record file. A missing file yields no records.
    pub fn load_records(&self) -> ServerResult<Vec<EconomyRecord>> {
        let contents = match std::fs::read_to_string(&self.records_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&contents).map_err(|e| ServerError::Records {
            path: self.records_path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Stats for one user. Reading the balance materializes a zero ledger
    /// record for users the ledger has never seen.
    pub fn user_stats(&self, raw_id: &str) -> ServerResult<UserStats> {
        let user_id = UserId::new(raw_id)?;
        let balance = self.ledger.balance(&user_id)?;
        let (ingresos, gastos) = self
            .load_records()?
            .into_iter()
            .find(|r| r.id == raw_id)
            .map(|r| (r.ingresos, r.gastos))
            .unwrap_or((0, 0));
        debug!(user = %user_id, balance, ingresos, gastos, "user stats computed");
        Ok(UserStats {
            user_id,
            balance,
            ingresos,
            gastos,
            neto: ingresos.saturating_sub(gastos),
        })
    }

    /// Top `limit` balances, ranked from 1.
    pub fn leaderboard(&self, limit: usize) -> ServerResult<Vec<LeaderboardEntry>> {
        let top = self.ledger.top_balances(limit)?;
        Ok(top
            .into_iter()
            .enumerate()
            .map(|(i, (user_id, balance))| LeaderboardEntry {
                rank: i + 1,
                user_id,
                balance,
            })
            .collect())
    }
}

impl std::fmt::Debug for StatsAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsAggregator")
            .field("records_path", &self.records_path)
            .finish()
    }
}

//! The [`BalanceStore`] trait defining the ledger interface.
//!
//! Command handlers and the stats aggregator talk to the ledger only through
//! this trait, so any backend (in-memory, JSON file) can sit behind them.

use std::collections::BTreeMap;

use umbra_types::{Balance, UserId};

use crate::error::LedgerResult;

/// Storage backend for user balances.
///
/// All implementations must satisfy these invariants:
/// - A user without a record has an implicit balance of 0. Every operation
///   except [`set_balance`](Self::set_balance) and
///   [`snapshot`](Self::snapshot) materializes that zero record first.
/// - [`debit`](Self::debit) never leaves a balance below zero.
/// - A durable backend has persisted the whole mapping before a mutating
///   call returns `Ok`.
pub trait BalanceStore: Send + Sync {
    /// Make sure `user` has a record, creating a zero balance if absent.
    ///
    /// Returns `Ok(true)` if a record was created. Persists only in that
    /// case.
    fn ensure_user(&self, user: &UserId) -> LedgerResult<bool>;

    /// Add `amount` to the balance of `user` and return the new balance.
    fn credit(&self, user: &UserId, amount: Balance) -> LedgerResult<Balance>;

    /// Subtract `amount` from the balance of `user`, flooring at zero, and
    /// return the new balance.
    fn debit(&self, user: &UserId, amount: Balance) -> LedgerResult<Balance>;

    /// Current balance of `user`.
    ///
    /// Not a pure read: an untouched user gets a zero record, which a
    /// durable backend persists.
    fn balance(&self, user: &UserId) -> LedgerResult<Balance>;

    /// Overwrite the balance of `user` with `amount`. No clamping.
    fn set_balance(&self, user: &UserId, amount: Balance) -> LedgerResult<()>;

    /// Copy of every record, sorted by user id.
    fn snapshot(&self) -> LedgerResult<BTreeMap<UserId, Balance>>;

    /// The `limit` highest balances, descending.
    ///
    /// Default implementation sorts a [`snapshot`](Self::snapshot).
    fn top_balances(&self, limit: usize) -> LedgerResult<Vec<(UserId, Balance)>> {
        let mut entries: Vec<(UserId, Balance)> = self.snapshot()?.into_iter().collect();
        entries.sort_by(|(ua, a), (ub, b)| b.cmp(a).then_with(|| ua.cmp(ub)));
        entries.truncate(limit);
        Ok(entries)
    }
}

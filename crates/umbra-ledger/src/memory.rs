//! In-memory ledger for tests and ephemeral use.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use umbra_types::{Balance, UserId};

use crate::book::BalanceBook;
use crate::error::{LedgerError, LedgerResult};
use crate::traits::BalanceStore;

/// An in-memory implementation of [`BalanceStore`].
///
/// Same arithmetic as [`JsonFileLedger`](crate::JsonFileLedger), but data
/// is lost when the ledger is dropped.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    book: RwLock<BalanceBook>,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger pre-populated with `book`.
    pub fn with_book(book: BalanceBook) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }

    /// Number of users with a record.
    pub fn len(&self) -> usize {
        self.book.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_book(&self) -> LedgerResult<RwLockWriteGuard<'_, BalanceBook>> {
        self.book
            .write()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))
    }
}

impl BalanceStore for InMemoryLedger {
    fn ensure_user(&self, user: &UserId) -> LedgerResult<bool> {
        Ok(self.write_book()?.ensure(user))
    }

    fn credit(&self, user: &UserId, amount: Balance) -> LedgerResult<Balance> {
        Ok(self.write_book()?.credit(user, amount).balance)
    }

    fn debit(&self, user: &UserId, amount: Balance) -> LedgerResult<Balance> {
        Ok(self.write_book()?.debit(user, amount).balance)
    }

    fn balance(&self, user: &UserId) -> LedgerResult<Balance> {
        Ok(self.write_book()?.balance(user).balance)
    }

    fn set_balance(&self, user: &UserId, amount: Balance) -> LedgerResult<()> {
        self.write_book()?.set(user, amount);
        Ok(())
    }

    fn snapshot(&self) -> LedgerResult<BTreeMap<UserId, Balance>> {
        let book = self
            .book
            .read()
            .map_err(|e| LedgerError::LockPoisoned(e.to_string()))?;
        Ok(book.to_map())
    }
}

//! Durable JSON-file ledger.
//!
//! [`JsonFileLedger`] keeps the whole balance mapping in memory and rewrites
//! the complete file after every mutation. The on-disk format is a flat,
//! pretty-printed JSON object (2-space indentation):
//!
//! ```text
//! {
//!   "123456789": 250,
//!   "987654321": 0
//! }
//! ```
//!
//! Each write costs O(number of users). That is fine for a single bot
//! economy; a batched or append-only backend would be needed well before
//! the mapping reaches millions of users.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use umbra_types::{Balance, UserId};

use crate::book::{BalanceBook, Mutation};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::traits::BalanceStore;

/// What happened when the ledger file was opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file did not exist and was initialized to an empty mapping.
    Created,
    /// The file was parsed successfully.
    Loaded { records: usize },
    /// The file could not be parsed; the ledger started empty. The next
    /// mutation overwrites the unreadable content.
    Corrupt { reason: String },
}

/// A [`BalanceStore`] persisted to a single JSON file.
///
/// Writes go to a temporary file in the same directory that is then renamed
/// over the ledger, so readers never observe a half-written document.
pub struct JsonFileLedger {
    path: PathBuf,
    book: RwLock<BalanceBook>,
    load: LoadOutcome,
}

impl JsonFileLedger {
    /// Open the ledger at `path`, creating it (and its parent directories)
    /// if it does not exist.
    ///
    /// Corrupt content is not an error: it is logged and the ledger starts
    /// from an empty mapping. See [`load_outcome`](Self::load_outcome).
    pub fn open(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = non_empty_parent(&path) {
            fs::create_dir_all(parent)?;
        }

        let created = !path.exists();
        if created {
            write_atomic(&path, b"{}")?;
        }

        let contents = fs::read_to_string(&path)?;
        let (book, load) = match serde_json::from_str::<BalanceBook>(&contents) {
            Ok(book) if created => (book, LoadOutcome::Created),
            Ok(book) => {
                let records = book.len();
                (book, LoadOutcome::Loaded { records })
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "ledger file is not valid JSON; starting from an empty mapping"
                );
                (
                    BalanceBook::new(),
                    LoadOutcome::Corrupt {
                        reason: e.to_string(),
                    },
                )
            }
        };

        info!(path = %path.display(), records = book.len(), "ledger opened");
        Ok(Self {
            path,
            book: RwLock::new(book),
            load,
        })
    }

    /// Open the ledger at the location named by `config`.
    pub fn open_config(config: &LedgerConfig) -> LedgerResult<Self> {
        Self::open(config.ledger_path())
    }

    /// Path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the file looked when the ledger was opened.
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load
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

    /// Rewrite the whole file from `book`. Called with the write lock held
    /// so file order matches mutation order.
    fn persist(&self, book: &BalanceBook) -> LedgerResult<()> {
        let json = serde_json::to_string_pretty(book)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        write_atomic(&self.path, json.as_bytes())?;
        debug!(path = %self.path.display(), records = book.len(), "ledger persisted");
        Ok(())
    }

    /// Persist a record that `ensure` just created. On failure the record
    /// is removed again so the next ensuring call retries the write.
    fn persist_created(&self, book: &mut BalanceBook, user: &UserId) -> LedgerResult<()> {
        debug!(user = %user, "ledger record created");
        if let Err(e) = self.persist(book) {
            book.forget(user);
            warn!(user = %user, error = %e, "could not persist new ledger record");
            return Err(e);
        }
        Ok(())
    }

    fn mutate<F>(&self, user: &UserId, op: &'static str, f: F) -> LedgerResult<Balance>
    where
        F: FnOnce(&mut BalanceBook) -> Mutation,
    {
        let mut book = self.write_book()?;
        let m = f(&mut book);
        debug!(user = %user, op, balance = m.balance, created = m.created, "ledger mutation");
        self.persist(&book)?;
        Ok(m.balance)
    }
}

impl BalanceStore for JsonFileLedger {
    fn ensure_user(&self, user: &UserId) -> LedgerResult<bool> {
        let mut book = self.write_book()?;
        let created = book.ensure(user);
        if created {
            self.persist_created(&mut book, user)?;
        }
        Ok(created)
    }

    fn credit(&self, user: &UserId, amount: Balance) -> LedgerResult<Balance> {
        self.mutate(user, "credit", |book| book.credit(user, amount))
    }

    fn debit(&self, user: &UserId, amount: Balance) -> LedgerResult<Balance> {
        self.mutate(user, "debit", |book| book.debit(user, amount))
    }

    fn balance(&self, user: &UserId) -> LedgerResult<Balance> {
        let mut book = self.write_book()?;
        let m = book.balance(user);
        if m.created {
            self.persist_created(&mut book, user)?;
        }
        Ok(m.balance)
    }

    fn set_balance(&self, user: &UserId, amount: Balance) -> LedgerResult<()> {
        self.mutate(user, "set", |book| {
            book.set(user, amount);
            Mutation {
                balance: amount,
                created: false,
            }
        })?;
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

impl std::fmt::Debug for JsonFileLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileLedger")
            .field("path", &self.path)
            .field("records", &self.len())
            .field("load", &self.load)
            .finish()
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = non_empty_parent(path).unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

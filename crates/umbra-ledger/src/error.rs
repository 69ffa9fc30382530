//! Error types for ledger operations.

use thiserror::Error;

/// Errors from ledger operations.
///
/// Only persistence and locking can fail; the balance arithmetic itself is
/// total (over-debits clamp, credits saturate).
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Serializing the balance mapping failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error while reading or writing the ledger file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A previous holder of the ledger lock panicked.
    #[error("ledger lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

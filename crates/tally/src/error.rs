//! Error types for the Ledger.

use tally_core::CoreError;
use thiserror::Error;

/// Errors that can occur during Ledger operations.
///
/// A receipt or line that cannot be found is not an error: the operation
/// leaves the snapshot as it was.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Core error (id parsing, operation decoding, encoding).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Configuration rejected at construction time.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

//! Error types for Tally Core.
//!
//! Missing receipts or lines are not errors. Engine operations report them
//! as unchanged snapshots, `None` or `false`.

use thiserror::Error;

/// Core errors that can occur at the edges of the pure engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid entity id: {0}")]
    InvalidId(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

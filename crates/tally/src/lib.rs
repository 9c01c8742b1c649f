//! # Tally
//!
//! The unified API for Tally: an expense ledger of receipts, each holding
//! named, priced lines, with running totals per receipt and overall.
//!
//! ## Overview
//!
//! - **Receipts**: An expense type plus an ordered list of lines
//! - **Lines**: A name and an amount
//! - **Summaries**: `{count, sum}` kept consistent on every transition
//! - **Ledger**: Holds the current snapshot and applies operations in order
//!
//! ## Key Concepts
//!
//! - **Snapshot**: Immutable. Never edited. Changes produce a new snapshot.
//! - **No-op**: An operation whose target is missing, or whose change is
//!   already in place, returns the same snapshot `Arc`.
//! - **Journal**: The dispatched operations, replayable into an identical
//!   snapshot given the same id sequence.
//!
//! ## Usage
//!
//! ```rust
//! use tally::{Ledger, LedgerConfig, Line};
//!
//! let ledger = Ledger::new(LedgerConfig::default()).unwrap();
//!
//! let list = ledger.add_receipt("Food");
//! let receipt_id = *list.receipts()[0].id();
//!
//! let list = ledger.add_receipt_line(&receipt_id);
//! let line_id = list.receipts()[0].lines()[0].id;
//!
//! let list = ledger.update_receipt_line(&receipt_id, Line::new(line_id, "Coffee", 4.5));
//! assert_eq!(list.summary().sum, 4.5);
//! ```
//!
//! ## Re-exports
//!
//! - `tally::core` - The pure engine (entities, summaries, operations)

pub mod config;
pub mod error;
pub mod ledger;

// Re-export component crates
pub use tally_core as core;

// Re-export main types for convenience
pub use config::{LedgerConfig, DEFAULT_EXPENSE_TYPES};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;

// Re-export commonly used core types
pub use tally_core::{
    EntityId, Fingerprint, IdGenerator, Line, Operation, RandomIds, Receipt, ReceiptList, Summary,
};

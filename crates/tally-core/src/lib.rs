//! # Tally Core
//!
//! Pure primitives for Tally: receipts, receipt lines, running summaries,
//! and the update engine that turns one receipt-list snapshot into the next.
//!
//! This crate contains no I/O, no locking, no logging. It is pure
//! computation over immutable, structurally shared trees.
//!
//! ## Key Types
//!
//! - [`ReceiptList`] - The root aggregate; one value is one snapshot
//! - [`Receipt`] - An expense type plus ordered [`Line`]s
//! - [`Summary`] - Derived `{count, sum}` aggregate
//! - [`EntityId`] - Random v4 identifier carried by every entity
//! - [`Operation`] - One user intent as data, for dispatch and replay
//!
//! ## Change detection
//!
//! Children are held in `Arc`s. An operation rebuilds only the path from the
//! changed leaf to the root and hands back the input `Arc` when nothing
//! changed, so [`std::sync::Arc::ptr_eq`] answers "did this subtree change".
//!
//! ```rust
//! use std::sync::Arc;
//! use tally_core::{add_receipt, add_receipt_line, update_receipt_line, Line, ReceiptList};
//!
//! let list = Arc::new(ReceiptList::new());
//! let list = add_receipt(&list, "Food");
//! let receipt_id = *list.receipts()[0].id();
//!
//! let list = add_receipt_line(&list, &receipt_id);
//! let line_id = list.receipts()[0].lines()[0].id;
//!
//! let list = update_receipt_line(&list, &receipt_id, Line::new(line_id, "Coffee", 4.5));
//! assert_eq!(list.summary().sum, 4.5);
//!
//! // Same values again: nothing to do, same snapshot back.
//! let again = update_receipt_line(&list, &receipt_id, Line::new(line_id, "Coffee", 4.5));
//! assert!(Arc::ptr_eq(&again, &list));
//! ```

pub mod canonical;
pub mod entity;
pub mod error;
pub mod id;
pub mod line;
pub mod operation;
pub mod receipt;
pub mod receipt_list;
pub mod summary;

pub use canonical::{canonical_bytes, fingerprint, Fingerprint};
pub use entity::Entity;
pub use error::{CoreError, Result};
pub use id::{EntityId, IdGenerator, RandomIds};
pub use line::{add_line, add_line_with, delete_line, update_line, Line};
pub use operation::{apply, replay, Operation};
pub use receipt::Receipt;
pub use receipt_list::{
    add_receipt, add_receipt_line, add_receipt_line_with, add_receipt_with, delete_receipt,
    delete_receipt_line, update_receipt_expense_type, update_receipt_line, ReceiptList,
};
pub use summary::{summarize, HasAmount, Summary};

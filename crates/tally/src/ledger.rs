//! The Ledger: holds the current receipt-list snapshot and applies
//! operations to it one at a time.
//!
//! Transitions are serialized by a mutex around read-apply-publish. Readers
//! never take that lock: the current snapshot lives in a `watch` channel and
//! is an immutable `Arc`, so a reader always sees a complete tree and an old
//! snapshot stays valid after later transitions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tally_core::{
    apply, fingerprint, EntityId, Fingerprint, IdGenerator, Line, Operation, RandomIds,
    ReceiptList,
};
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::config::LedgerConfig;
use crate::error::Result;

/// The application state container.
///
/// Provides a unified API for:
/// - Reading the current snapshot
/// - Applying the six receipt/line operations
/// - Observing snapshot changes
/// - Auditing dispatched operations through the journal
pub struct Ledger {
    /// Configuration.
    config: LedgerConfig,
    /// Id source and journal; held for the whole of each transition.
    inner: Mutex<LedgerInner>,
    /// Publishes the current snapshot.
    snapshots: watch::Sender<Arc<ReceiptList>>,
}

struct LedgerInner {
    ids: Box<dyn IdGenerator + Send>,
    journal: Vec<Operation>,
}

impl Ledger {
    /// Create a ledger with an empty receipt list and random ids.
    pub fn new(config: LedgerConfig) -> Result<Self> {
        Self::with_ids(config, RandomIds)
    }

    /// Create a ledger drawing every id, including the root list's, from `ids`.
    pub fn with_ids(config: LedgerConfig, ids: impl IdGenerator + Send + 'static) -> Result<Self> {
        config.validate()?;

        let mut ids: Box<dyn IdGenerator + Send> = Box::new(ids);
        let root = Arc::new(ReceiptList::with_id(ids.next_id()));
        let (snapshots, _) = watch::channel(root);

        debug!(journal = config.journal, "ledger created");
        Ok(Self {
            config,
            inner: Mutex::new(LedgerInner {
                ids,
                journal: Vec::new(),
            }),
            snapshots,
        })
    }

    /// Rebuild a ledger by dispatching `operations` in order.
    ///
    /// Given the same id sequence that produced a journal, the rebuilt
    /// ledger's snapshot has the same fingerprint as the original.
    pub fn rebuild<I>(
        config: LedgerConfig,
        ids: impl IdGenerator + Send + 'static,
        operations: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Operation>,
    {
        let ledger = Self::with_ids(config, ids)?;
        for operation in operations {
            ledger.dispatch(operation);
        }
        Ok(ledger)
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Expense types to offer when creating or relabelling a receipt.
    pub fn expense_types(&self) -> &[String] {
        &self.config.expense_types
    }

    /// Expense type to preselect for a new receipt.
    pub fn default_expense_type(&self) -> &str {
        &self.config.default_expense_type
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<ReceiptList> {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Observe snapshot changes. No-op transitions do not notify.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ReceiptList>> {
        self.snapshots.subscribe()
    }

    /// Operations dispatched so far, in order. Empty if journaling is off.
    pub fn journal(&self) -> Vec<Operation> {
        self.lock().journal.clone()
    }

    /// Fingerprint of the current snapshot.
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        Ok(fingerprint(&self.snapshot())?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply one operation and publish the resulting snapshot.
    ///
    /// Returns the snapshot after the transition, which is the previous one
    /// (same `Arc`) when the operation was a no-op.
    pub fn dispatch(&self, operation: Operation) -> Arc<ReceiptList> {
        if let Some(label) = operation_expense_type(&operation) {
            if !self.config.is_known_expense_type(label) {
                debug!(expense_type = label, "expense type outside the catalogue");
            }
        }

        let mut inner = self.lock();
        let LedgerInner { ids, journal } = &mut *inner;

        let current = self.snapshot();
        let next = apply(&current, &operation, &mut **ids);
        let changed = !Arc::ptr_eq(&next, &current);

        debug!(operation = operation.name(), changed, "dispatched operation");
        trace!(
            receipts = next.summary().count,
            total = next.summary().sum,
            "ledger summary"
        );

        if self.config.journal {
            journal.push(operation);
        }
        if changed {
            self.snapshots.send_replace(Arc::clone(&next));
        }
        next
    }

    /// Decode a JSON-encoded operation and dispatch it.
    ///
    /// Unknown operation types leave the snapshot unchanged; malformed JSON
    /// is an error and nothing is dispatched.
    pub fn dispatch_json(&self, json: &str) -> Result<Arc<ReceiptList>> {
        let operation = Operation::from_json(json)?;
        Ok(self.dispatch(operation))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Receipt Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append an empty receipt.
    pub fn add_receipt(&self, expense_type: &str) -> Arc<ReceiptList> {
        self.dispatch(Operation::AddReceipt {
            expense_type: expense_type.to_string(),
        })
    }

    /// Append an empty receipt labelled with the default expense type.
    pub fn add_default_receipt(&self) -> Arc<ReceiptList> {
        self.dispatch(Operation::AddReceipt {
            expense_type: self.config.default_expense_type.clone(),
        })
    }

    /// Remove a receipt.
    pub fn delete_receipt(&self, receipt_id: &EntityId) -> Arc<ReceiptList> {
        self.dispatch(Operation::DeleteReceipt {
            receipt_id: *receipt_id,
        })
    }

    /// Change a receipt's expense type.
    pub fn update_receipt_expense_type(
        &self,
        receipt_id: &EntityId,
        expense_type: &str,
    ) -> Arc<ReceiptList> {
        self.dispatch(Operation::UpdateReceiptExpenseType {
            receipt_id: *receipt_id,
            expense_type: expense_type.to_string(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Line Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a blank line to a receipt.
    pub fn add_receipt_line(&self, receipt_id: &EntityId) -> Arc<ReceiptList> {
        self.dispatch(Operation::AddReceiptLine {
            receipt_id: *receipt_id,
        })
    }

    /// Replace a line (matched by `line.id`) inside a receipt.
    pub fn update_receipt_line(&self, receipt_id: &EntityId, line: Line) -> Arc<ReceiptList> {
        self.dispatch(Operation::UpdateReceiptLine {
            receipt_id: *receipt_id,
            line,
        })
    }

    /// Remove a line from a receipt.
    pub fn delete_receipt_line(&self, receipt_id: &EntityId, line_id: &EntityId) -> Arc<ReceiptList> {
        self.dispatch(Operation::DeleteReceiptLine {
            receipt_id: *receipt_id,
            line_id: *line_id,
        })
    }

    /// Snapshots are immutable, so a panic mid-transition cannot leave a
    /// half-applied tree behind; a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, LedgerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The label an operation would write, if it writes one.
fn operation_expense_type(operation: &Operation) -> Option<&str> {
    match operation {
        Operation::AddReceipt { expense_type }
        | Operation::UpdateReceiptExpenseType { expense_type, .. } => Some(expense_type.as_str()),
        _ => None,
    }
}

//! The receipt list: root aggregate of the model, and the engine that
//! produces its next snapshot.
//!
//! Every operation here is a total function from the current snapshot to
//! the next one. Only the path from the changed leaf to the root is rebuilt;
//! untouched receipts and lines are shared with the previous snapshot. When
//! the referenced receipt or line does not exist, or the requested change is
//! already in place, the input `Arc` is returned unchanged so callers can
//! test for "nothing happened" with [`Arc::ptr_eq`].

use serde::Serialize;
use std::sync::Arc;

use crate::entity::{appended, position, removed, replaced};
use crate::id::{EntityId, IdGenerator, RandomIds};
use crate::line::{self, Line};
use crate::receipt::Receipt;
use crate::summary::{summarize, Summary};

/// The root aggregate: all receipts and their running total.
///
/// Immutable. `summary` always equals `summarize(receipts)`, where each
/// receipt contributes its own line total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptList {
    id: EntityId,
    receipts: Vec<Arc<Receipt>>,
    summary: Summary,
}

impl ReceiptList {
    /// Create an empty list with a fresh random id.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::with_id(EntityId::new())
    }

    /// Create an empty list with the given id.
    pub fn with_id(id: EntityId) -> Self {
        Self {
            id,
            receipts: Vec::new(),
            summary: Summary::EMPTY,
        }
    }

    /// Create a list holding `receipts` in the given order.
    pub fn with_receipts(id: EntityId, receipts: Vec<Receipt>) -> Self {
        Self::from_parts(id, receipts.into_iter().map(Arc::new).collect())
    }

    fn from_parts(id: EntityId, receipts: Vec<Arc<Receipt>>) -> Self {
        let summary = summarize(&receipts);
        Self {
            id,
            receipts,
            summary,
        }
    }

    /// Same list with a new receipt collection; the summary is recomputed.
    fn replace_receipts(&self, receipts: Vec<Arc<Receipt>>) -> Arc<Self> {
        Arc::new(Self::from_parts(self.id, receipts))
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Receipts in insertion order.
    pub fn receipts(&self) -> &[Arc<Receipt>] {
        &self.receipts
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Look up a receipt by id.
    pub fn receipt(&self, id: &EntityId) -> Option<&Arc<Receipt>> {
        position(&self.receipts, id).map(|ix| &self.receipts[ix])
    }

    /// Whether every receipt summary and the list summary match their
    /// collections.
    pub fn is_consistent(&self) -> bool {
        self.summary == summarize(&self.receipts)
            && self
                .receipts
                .iter()
                .all(|r| r.summary() == summarize(r.lines()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Receipt operations
// ─────────────────────────────────────────────────────────────────────────────

/// Append an empty receipt with a fresh random id.
pub fn add_receipt(list: &ReceiptList, expense_type: &str) -> Arc<ReceiptList> {
    add_receipt_with(list, expense_type, &mut RandomIds)
}

/// Append an empty receipt whose id comes from `ids`.
pub fn add_receipt_with(
    list: &ReceiptList,
    expense_type: &str,
    ids: &mut dyn IdGenerator,
) -> Arc<ReceiptList> {
    let receipt = Arc::new(Receipt::new(ids.next_id(), expense_type));
    list.replace_receipts(appended(list.receipts(), receipt))
}

/// Remove the receipt with the given id.
pub fn delete_receipt(list: &Arc<ReceiptList>, receipt_id: &EntityId) -> Arc<ReceiptList> {
    match position(list.receipts(), receipt_id) {
        Some(index) => list.replace_receipts(removed(list.receipts(), index)),
        None => Arc::clone(list),
    }
}

/// Change a receipt's expense type.
///
/// Expense types never affect totals, so the list summary is carried over
/// as-is instead of being recomputed.
pub fn update_receipt_expense_type(
    list: &Arc<ReceiptList>,
    receipt_id: &EntityId,
    expense_type: &str,
) -> Arc<ReceiptList> {
    let Some(index) = position(list.receipts(), receipt_id) else {
        return Arc::clone(list);
    };
    let current = &list.receipts()[index];
    if current.expense_type() == expense_type {
        return Arc::clone(list);
    }

    let receipt = Arc::new(current.replace_expense_type(expense_type.to_string()));
    Arc::new(ReceiptList {
        id: list.id,
        receipts: replaced(list.receipts(), index, receipt),
        summary: list.summary,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Line operations
// ─────────────────────────────────────────────────────────────────────────────

/// Append a blank line (random id) to the receipt with the given id.
pub fn add_receipt_line(list: &Arc<ReceiptList>, receipt_id: &EntityId) -> Arc<ReceiptList> {
    add_receipt_line_with(list, receipt_id, &mut RandomIds)
}

/// Append a blank line, id drawn from `ids`, to the receipt with the given id.
///
/// The target is located in `list` itself, so a stale receipt reference held
/// by the caller cannot roll back edits made since it was read.
pub fn add_receipt_line_with(
    list: &Arc<ReceiptList>,
    receipt_id: &EntityId,
    ids: &mut dyn IdGenerator,
) -> Arc<ReceiptList> {
    let Some(index) = position(list.receipts(), receipt_id) else {
        return Arc::clone(list);
    };
    let (receipt, _) = line::add_line_with(&list.receipts()[index], ids);
    list.replace_receipts(replaced(list.receipts(), index, receipt))
}

/// Replace a line inside the receipt with the given id.
pub fn update_receipt_line(
    list: &Arc<ReceiptList>,
    receipt_id: &EntityId,
    candidate: Line,
) -> Arc<ReceiptList> {
    let Some(index) = position(list.receipts(), receipt_id) else {
        return Arc::clone(list);
    };
    let current = &list.receipts()[index];
    match line::update_line(current, candidate) {
        Some((receipt, _)) if !Arc::ptr_eq(&receipt, current) => {
            list.replace_receipts(replaced(list.receipts(), index, receipt))
        }
        _ => Arc::clone(list),
    }
}

/// Remove a line from the receipt with the given id.
pub fn delete_receipt_line(
    list: &Arc<ReceiptList>,
    receipt_id: &EntityId,
    line_id: &EntityId,
) -> Arc<ReceiptList> {
    let Some(index) = position(list.receipts(), receipt_id) else {
        return Arc::clone(list);
    };
    match line::delete_line(&list.receipts()[index], line_id) {
        (receipt, true) => list.replace_receipts(replaced(list.receipts(), index, receipt)),
        (_, false) => Arc::clone(list),
    }
}

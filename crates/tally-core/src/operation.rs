//! The closed set of operations over a receipt list, as data.
//!
//! An [`Operation`] names one user intent. Applying a sequence of them to a
//! starting snapshot with the same id sequence always yields the same final
//! snapshot, which is what makes an operation log replayable for audit.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{CoreError, Result};
use crate::id::{EntityId, IdGenerator};
use crate::line::Line;
use crate::receipt_list::{
    add_receipt_line_with, add_receipt_with, delete_receipt, delete_receipt_line,
    update_receipt_expense_type, update_receipt_line, ReceiptList,
};

/// One dispatched intent.
///
/// Encoded with a `"type"` tag. Tags this version does not know decode to
/// [`Operation::Unrecognized`], which leaves the snapshot unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    AddReceipt {
        expense_type: String,
    },
    DeleteReceipt {
        receipt_id: EntityId,
    },
    UpdateReceiptExpenseType {
        receipt_id: EntityId,
        expense_type: String,
    },
    AddReceiptLine {
        receipt_id: EntityId,
    },
    UpdateReceiptLine {
        receipt_id: EntityId,
        line: Line,
    },
    DeleteReceiptLine {
        receipt_id: EntityId,
        line_id: EntityId,
    },
    #[serde(other)]
    Unrecognized,
}

impl Operation {
    /// Short stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddReceipt { .. } => "add_receipt",
            Operation::DeleteReceipt { .. } => "delete_receipt",
            Operation::UpdateReceiptExpenseType { .. } => "update_receipt_expense_type",
            Operation::AddReceiptLine { .. } => "add_receipt_line",
            Operation::UpdateReceiptLine { .. } => "update_receipt_line",
            Operation::DeleteReceiptLine { .. } => "delete_receipt_line",
            Operation::Unrecognized => "unrecognized",
        }
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::Decoding(e.to_string()))
    }

    /// Encode as JSON.
    ///
    /// JSON has no encoding for `NaN` or the infinities, so a line carrying
    /// one is an `Encoding` error rather than text that cannot be decoded.
    pub fn to_json(&self) -> Result<String> {
        if let Operation::UpdateReceiptLine { line, .. } = self {
            if !line.amount.is_finite() {
                return Err(CoreError::Encoding(format!(
                    "line {} amount {} has no JSON form",
                    line.id, line.amount
                )));
            }
        }
        serde_json::to_string(self).map_err(|e| CoreError::Encoding(e.to_string()))
    }
}

/// Apply one operation, drawing any new ids from `ids`.
pub fn apply(
    list: &Arc<ReceiptList>,
    operation: &Operation,
    ids: &mut dyn IdGenerator,
) -> Arc<ReceiptList> {
    match operation {
        Operation::AddReceipt { expense_type } => add_receipt_with(list, expense_type, ids),
        Operation::DeleteReceipt { receipt_id } => delete_receipt(list, receipt_id),
        Operation::UpdateReceiptExpenseType {
            receipt_id,
            expense_type,
        } => update_receipt_expense_type(list, receipt_id, expense_type),
        Operation::AddReceiptLine { receipt_id } => add_receipt_line_with(list, receipt_id, ids),
        Operation::UpdateReceiptLine { receipt_id, line } => {
            update_receipt_line(list, receipt_id, line.clone())
        }
        Operation::DeleteReceiptLine {
            receipt_id,
            line_id,
        } => delete_receipt_line(list, receipt_id, line_id),
        Operation::Unrecognized => Arc::clone(list),
    }
}

/// Fold a sequence of operations over `initial`.
pub fn replay<'a, I>(
    initial: Arc<ReceiptList>,
    operations: I,
    ids: &mut dyn IdGenerator,
) -> Arc<ReceiptList>
where
    I: IntoIterator<Item = &'a Operation>,
{
    operations
        .into_iter()
        .fold(initial, |list, operation| apply(&list, operation, &mut *ids))
}

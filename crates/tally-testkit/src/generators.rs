//! Proptest generators for property-based testing.
//!
//! Operations have to reference receipts and lines that exist, so scripts
//! are generated as [`Step`]s holding positional [`Index`]es and resolved
//! into concrete [`Operation`]s against the snapshot they are applied to.

use proptest::prelude::*;
use proptest::sample::Index;

use tally_core::{EntityId, Line, Operation, ReceiptList};

/// Generate an amount.
///
/// Multiples of 0.25 below 10 000 are exact in `f64` and so are all their
/// partial sums at these sizes, which keeps sum equalities exact.
pub fn amount() -> impl Strategy<Value = f64> {
    (0u32..40_000).prop_map(|quarters| f64::from(quarters) * 0.25)
}

/// Generate a line name, empty included.
pub fn line_name() -> impl Strategy<Value = String> {
    "[A-Za-z ]{0,12}".prop_map(String::from)
}

/// Generate an expense type: mostly from the default catalogue.
pub fn expense_type() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just("Food".to_string()),
        2 => Just("Houseware".to_string()),
        2 => Just("Entertainment".to_string()),
        1 => "[A-Z][a-z]{0,9}".prop_map(String::from),
    ]
}

/// One scripted user intent, with targets chosen by position.
#[derive(Debug, Clone)]
pub enum Step {
    AddReceipt {
        expense_type: String,
    },
    DeleteReceipt {
        receipt: Index,
    },
    UpdateExpenseType {
        receipt: Index,
        expense_type: String,
    },
    AddLine {
        receipt: Index,
    },
    UpdateLine {
        receipt: Index,
        line: Index,
        name: String,
        amount: f64,
    },
    DeleteLine {
        receipt: Index,
        line: Index,
    },
    /// Target ids that do not exist.
    DeleteMissingReceipt,
    UpdateMissingLine {
        receipt: Index,
    },
}

impl Step {
    /// Turn the step into an operation against `list`.
    ///
    /// Positions wrap around the current collection sizes; when a collection
    /// is empty a fresh (absent) id is used, which makes the operation a no-op.
    pub fn resolve(&self, list: &ReceiptList) -> Operation {
        match self {
            Step::AddReceipt { expense_type } => Operation::AddReceipt {
                expense_type: expense_type.clone(),
            },
            Step::DeleteReceipt { receipt } => Operation::DeleteReceipt {
                receipt_id: receipt_id(list, receipt),
            },
            Step::UpdateExpenseType {
                receipt,
                expense_type,
            } => Operation::UpdateReceiptExpenseType {
                receipt_id: receipt_id(list, receipt),
                expense_type: expense_type.clone(),
            },
            Step::AddLine { receipt } => Operation::AddReceiptLine {
                receipt_id: receipt_id(list, receipt),
            },
            Step::UpdateLine {
                receipt,
                line,
                name,
                amount,
            } => {
                let (receipt_id, line_id) = line_target(list, receipt, line);
                Operation::UpdateReceiptLine {
                    receipt_id,
                    line: Line::new(line_id, name.clone(), *amount),
                }
            }
            Step::DeleteLine { receipt, line } => {
                let (receipt_id, line_id) = line_target(list, receipt, line);
                Operation::DeleteReceiptLine {
                    receipt_id,
                    line_id,
                }
            }
            Step::DeleteMissingReceipt => Operation::DeleteReceipt {
                receipt_id: EntityId::new(),
            },
            Step::UpdateMissingLine { receipt } => Operation::UpdateReceiptLine {
                receipt_id: receipt_id(list, receipt),
                line: Line::new(EntityId::new(), "Ghost", 1.0),
            },
        }
    }
}

fn receipt_id(list: &ReceiptList, receipt: &Index) -> EntityId {
    let receipts = list.receipts();
    if receipts.is_empty() {
        return EntityId::new();
    }
    *receipts[receipt.index(receipts.len())].id()
}

fn line_target(list: &ReceiptList, receipt: &Index, line: &Index) -> (EntityId, EntityId) {
    let receipts = list.receipts();
    if receipts.is_empty() {
        return (EntityId::new(), EntityId::new());
    }
    let target = &receipts[receipt.index(receipts.len())];
    let lines = target.lines();
    let line_id = if lines.is_empty() {
        EntityId::new()
    } else {
        lines[line.index(lines.len())].id
    };
    (*target.id(), line_id)
}

/// Generate a single step. Adds are weighted up so scripts build real trees.
pub fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => expense_type().prop_map(|expense_type| Step::AddReceipt { expense_type }),
        1 => any::<Index>().prop_map(|receipt| Step::DeleteReceipt { receipt }),
        1 => (any::<Index>(), expense_type())
            .prop_map(|(receipt, expense_type)| Step::UpdateExpenseType { receipt, expense_type }),
        4 => any::<Index>().prop_map(|receipt| Step::AddLine { receipt }),
        4 => (any::<Index>(), any::<Index>(), line_name(), amount())
            .prop_map(|(receipt, line, name, amount)| Step::UpdateLine { receipt, line, name, amount }),
        1 => (any::<Index>(), any::<Index>())
            .prop_map(|(receipt, line)| Step::DeleteLine { receipt, line }),
        1 => Just(Step::DeleteMissingReceipt),
        1 => any::<Index>().prop_map(|receipt| Step::UpdateMissingLine { receipt }),
    ]
}

/// Generate a script of up to `max_len` steps.
pub fn script(max_len: usize) -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(step(), 0..=max_len)
}

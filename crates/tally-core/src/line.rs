//! Receipt lines and the operations that edit a receipt's line list.
//!
//! Every operation takes the current receipt and returns a new one; the
//! input is never touched. Lines are matched by id only, never by value:
//! two distinct lines may carry the same name and amount.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entity::{appended, position, removed, replaced, Entity};
use crate::id::{EntityId, IdGenerator, RandomIds};
use crate::receipt::Receipt;
use crate::summary::HasAmount;

/// One line of a receipt.
///
/// Immutable. An edit produces a new `Line` with the same `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: EntityId,
    pub name: String,
    /// Not clamped or validated; input checking belongs to the caller.
    pub amount: f64,
}

impl Line {
    pub fn new(id: EntityId, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
        }
    }

    /// A blank line: empty name, zero amount.
    pub fn blank(id: EntityId) -> Self {
        Self::new(id, "", 0.0)
    }

    /// Whether `other` carries exactly the same name and amount.
    ///
    /// Amounts compare with `==`: `-0.0` matches `0.0`, and `NaN` never matches.
    fn same_values(&self, other: &Line) -> bool {
        self.name == other.name && self.amount == other.amount
    }
}

impl Entity for Line {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl HasAmount for Line {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Append a blank line with a fresh random id.
pub fn add_line(receipt: &Receipt) -> (Arc<Receipt>, Arc<Line>) {
    add_line_with(receipt, &mut RandomIds)
}

/// Append a blank line whose id comes from `ids`.
///
/// Always yields a new receipt: the line count changes even though the sum
/// does not.
pub fn add_line_with(receipt: &Receipt, ids: &mut dyn IdGenerator) -> (Arc<Receipt>, Arc<Line>) {
    let line = Arc::new(Line::blank(ids.next_id()));
    let lines = appended(receipt.lines(), Arc::clone(&line));
    (Arc::new(receipt.replace_lines(lines)), line)
}

/// Replace the line whose id matches `candidate.id`.
///
/// - `None` if no such line exists; the receipt is untouched.
/// - If name and amount are identical, the existing receipt and line are
///   returned as-is (same `Arc`s), so callers can detect the no-op with
///   [`Arc::ptr_eq`].
/// - Otherwise the line is swapped in place, the summary recomputed, and
///   the candidate returned.
pub fn update_line(receipt: &Arc<Receipt>, candidate: Line) -> Option<(Arc<Receipt>, Arc<Line>)> {
    let index = position(receipt.lines(), &candidate.id)?;
    let existing = &receipt.lines()[index];

    if existing.same_values(&candidate) {
        return Some((Arc::clone(receipt), Arc::clone(existing)));
    }

    let line = Arc::new(candidate);
    let lines = replaced(receipt.lines(), index, Arc::clone(&line));
    Some((Arc::new(receipt.replace_lines(lines)), line))
}

/// Remove the line with the given id.
///
/// Returns the input receipt and `false` if the line is not present.
pub fn delete_line(receipt: &Arc<Receipt>, line_id: &EntityId) -> (Arc<Receipt>, bool) {
    match position(receipt.lines(), line_id) {
        Some(index) => {
            let lines = removed(receipt.lines(), index);
            (Arc::new(receipt.replace_lines(lines)), true)
        }
        None => (Arc::clone(receipt), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{summarize, Summary};

    /// A receipt with `count` lines named "Line n" costing n * 100.
    fn receipt_with(count: usize) -> (Arc<Receipt>, f64) {
        let mut receipt = Arc::new(Receipt::new(EntityId::new(), ""));
        let mut sum = 0.0;
        for i in 1..=count {
            let (next, line) = add_line(&receipt);
            let amount = (i * 100) as f64;
            let edited = Line::new(line.id, format!("Line {i}"), amount);
            receipt = update_line(&next, edited).unwrap().0;
            sum += amount;
        }
        (receipt, sum)
    }

    #[test]
    fn test_built_receipt_summary() {
        let (receipt, sum) = receipt_with(10);
        assert_eq!(receipt.summary(), Summary::new(10, sum));
    }

    #[test]
    fn test_add_line_appends_blank() {
        let (receipt, _) = receipt_with(3);
        let (next, line) = add_line(&receipt);

        assert!(!Arc::ptr_eq(&next, &receipt));
        assert_eq!(line.name, "");
        assert_eq!(line.amount, 0.0);
        assert_eq!(next.lines().len(), 4);
        assert!(Arc::ptr_eq(next.lines().last().unwrap(), &line));
        assert_eq!(next.summary().count, receipt.summary().count + 1);
        assert_eq!(next.summary().sum, receipt.summary().sum);
        // The input is unchanged.
        assert_eq!(receipt.lines().len(), 3);
    }

    #[test]
    fn test_update_line_name() {
        let (receipt, _) = receipt_with(10);
        let old = Arc::clone(&receipt.lines()[0]);
        let candidate = Line::new(old.id, format!("{} UPDATED", old.name), old.amount);

        let (next, line) = update_line(&receipt, candidate).unwrap();
        assert_eq!(line.name, "Line 1 UPDATED");
        assert_eq!(line.id, old.id);
        assert!(!Arc::ptr_eq(&line, &old));
        assert!(!Arc::ptr_eq(&next, &receipt));
        assert_eq!(next.summary(), receipt.summary());
    }

    #[test]
    fn test_update_line_amount_moves_sum_by_delta() {
        let (receipt, _) = receipt_with(10);
        let old = Arc::clone(&receipt.lines()[0]);
        let candidate = Line::new(old.id, old.name.clone(), old.amount + 123.0);

        let (next, line) = update_line(&receipt, candidate).unwrap();
        assert_eq!(line.amount, old.amount + 123.0);
        assert_eq!(next.summary().sum - receipt.summary().sum, 123.0);
        assert_eq!(next.summary().count, receipt.summary().count);
    }

    #[test]
    fn test_update_line_noop_keeps_identity() {
        let (receipt, _) = receipt_with(10);
        let old = Arc::clone(&receipt.lines()[0]);
        let candidate = Line::new(old.id, old.name.clone(), old.amount);

        let (next, line) = update_line(&receipt, candidate).unwrap();
        assert!(Arc::ptr_eq(&next, &receipt));
        assert!(Arc::ptr_eq(&line, &old));
    }

    #[test]
    fn test_update_nan_line_always_rebuilds() {
        let line = Line::new(EntityId::new(), "Unknown", f64::NAN);
        let receipt = Arc::new(Receipt::with_lines(EntityId::new(), "Food", vec![line.clone()]));
        let old = Arc::clone(&receipt.lines()[0]);

        let (next, updated) = update_line(&receipt, line).unwrap();
        assert!(!Arc::ptr_eq(&next, &receipt));
        assert!(!Arc::ptr_eq(&updated, &old));
        assert!(next.summary().sum.is_nan());
    }

    #[test]
    fn test_update_signed_zero_is_noop() {
        let line = Line::new(EntityId::new(), "Free sample", 0.0);
        let receipt = Arc::new(Receipt::with_lines(EntityId::new(), "Food", vec![line.clone()]));

        let candidate = Line::new(line.id, "Free sample", -0.0);
        let (next, updated) = update_line(&receipt, candidate).unwrap();
        assert!(Arc::ptr_eq(&next, &receipt));
        assert!(Arc::ptr_eq(&updated, &receipt.lines()[0]));
        assert!(updated.amount.is_sign_positive());
    }

    #[test]
    fn test_update_missing_line_is_none() {
        let (receipt, _) = receipt_with(10);
        let old = &receipt.lines()[0];
        let candidate = Line::new(EntityId::new(), old.name.clone(), old.amount);
        assert!(update_line(&receipt, candidate).is_none());
    }

    #[test]
    fn test_update_preserves_order() {
        let (receipt, _) = receipt_with(5);
        let target = &receipt.lines()[2];
        let candidate = Line::new(target.id, "Middle", 1.0);

        let (next, _) = update_line(&receipt, candidate).unwrap();
        let before: Vec<_> = receipt.lines().iter().map(|l| l.id).collect();
        let after: Vec<_> = next.lines().iter().map(|l| l.id).collect();
        assert_eq!(before, after);
        assert_eq!(next.lines()[2].name, "Middle");
    }

    #[test]
    fn test_delete_line() {
        let (receipt, _) = receipt_with(10);
        let victim = Arc::clone(&receipt.lines()[0]);

        let (next, deleted) = delete_line(&receipt, &victim.id);
        assert!(deleted);
        assert_eq!(next.summary().count, receipt.summary().count - 1);
        assert_eq!(next.summary().sum, receipt.summary().sum - victim.amount);
        assert_eq!(next.summary(), summarize(next.lines()));
        assert!(next.line(&victim.id).is_none());
    }

    #[test]
    fn test_delete_missing_line() {
        let (receipt, _) = receipt_with(10);
        let (next, deleted) = delete_line(&receipt, &EntityId::new());
        assert!(!deleted);
        assert!(Arc::ptr_eq(&next, &receipt));
    }

    #[test]
    fn test_lines_with_equal_values_stay_distinct() {
        let twin_a = Line::new(EntityId::new(), "Milk", 1.2);
        let twin_b = Line::new(EntityId::new(), "Milk", 1.2);
        let receipt = Arc::new(Receipt::with_lines(
            EntityId::new(),
            "Food",
            vec![twin_a.clone(), twin_b.clone()],
        ));

        let (next, deleted) = delete_line(&receipt, &twin_b.id);
        assert!(deleted);
        assert_eq!(next.lines().len(), 1);
        assert_eq!(next.lines()[0].id, twin_a.id);
    }
}

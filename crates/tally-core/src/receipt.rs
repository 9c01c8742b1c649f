//! Receipts: an expense type plus an ordered list of lines.

use serde::Serialize;
use std::sync::Arc;

use crate::entity::{position, Entity};
use crate::id::EntityId;
use crate::line::Line;
use crate::summary::{summarize, HasAmount, Summary};

/// One receipt.
///
/// Immutable. `summary` always equals `summarize(lines)`; the fields are
/// private so that invariant cannot be broken from outside the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    id: EntityId,
    expense_type: String,
    lines: Vec<Arc<Line>>,
    summary: Summary,
}

impl Receipt {
    /// Create an empty receipt.
    pub fn new(id: EntityId, expense_type: impl Into<String>) -> Self {
        Self {
            id,
            expense_type: expense_type.into(),
            lines: Vec::new(),
            summary: Summary::EMPTY,
        }
    }

    /// Create a receipt holding `lines` in the given order.
    pub fn with_lines(id: EntityId, expense_type: impl Into<String>, lines: Vec<Line>) -> Self {
        let lines = lines.into_iter().map(Arc::new).collect();
        Self::from_parts(id, expense_type.into(), lines)
    }

    pub(crate) fn from_parts(id: EntityId, expense_type: String, lines: Vec<Arc<Line>>) -> Self {
        let summary = summarize(&lines);
        Self {
            id,
            expense_type,
            lines,
            summary,
        }
    }

    /// Same receipt with a new line collection; the summary is recomputed.
    pub(crate) fn replace_lines(&self, lines: Vec<Arc<Line>>) -> Self {
        Self::from_parts(self.id, self.expense_type.clone(), lines)
    }

    /// Same receipt with a new expense type. Lines and summary are shared.
    pub(crate) fn replace_expense_type(&self, expense_type: String) -> Self {
        Self {
            id: self.id,
            expense_type,
            lines: self.lines.clone(),
            summary: self.summary,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn expense_type(&self) -> &str {
        &self.expense_type
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[Arc<Line>] {
        &self.lines
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Look up a line by id.
    pub fn line(&self, id: &EntityId) -> Option<&Arc<Line>> {
        position(&self.lines, id).map(|ix| &self.lines[ix])
    }
}

impl Entity for Receipt {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// A receipt contributes its line total to the list summary.
impl HasAmount for Receipt {
    fn amount(&self) -> f64 {
        self.summary.sum
    }
}

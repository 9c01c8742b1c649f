//! Ledger configuration.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Expense types offered to the view layer when none are configured.
pub const DEFAULT_EXPENSE_TYPES: [&str; 3] = ["Food", "Houseware", "Entertainment"];

/// Configuration for the Ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Expense types the view layer offers. The engine accepts any label;
    /// this is a catalogue, not a constraint.
    pub expense_types: Vec<String>,
    /// Expense type preselected for new receipts.
    pub default_expense_type: String,
    /// Whether dispatched operations are kept in the in-memory journal.
    pub journal: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            expense_types: DEFAULT_EXPENSE_TYPES.iter().map(|s| s.to_string()).collect(),
            default_expense_type: DEFAULT_EXPENSE_TYPES[0].to_string(),
            journal: true,
        }
    }
}

impl LedgerConfig {
    /// Whether `expense_type` is in the catalogue.
    pub fn is_known_expense_type(&self, expense_type: &str) -> bool {
        self.expense_types.iter().any(|t| t == expense_type)
    }

    /// Check the catalogue is usable: non-empty, and it contains the default.
    pub fn validate(&self) -> Result<()> {
        if self.expense_types.is_empty() {
            return Err(LedgerError::InvalidConfig(
                "expense_types must not be empty".to_string(),
            ));
        }
        if !self.is_known_expense_type(&self.default_expense_type) {
            return Err(LedgerError::InvalidConfig(format!(
                "default expense type {:?} is not in expense_types",
                self.default_expense_type
            )));
        }
        Ok(())
    }
}

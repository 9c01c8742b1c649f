//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use tally::{EntityId, Ledger, LedgerConfig, Line, ReceiptList, Result};

use crate::ids::SeededIds;

/// A ledger with seeded ids, so every run of a test builds the same tree.
pub struct LedgerFixture {
    pub ledger: Ledger,
    pub seed: u64,
}

impl LedgerFixture {
    /// Create a fixture with the default configuration and seed 0.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create with a specific id seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(LedgerConfig::default(), seed)
    }

    /// Create with a specific configuration and id seed.
    ///
    /// # Panics
    ///
    /// If `config` does not validate.
    pub fn with_config(config: LedgerConfig, seed: u64) -> Self {
        let ledger = Ledger::with_ids(config, SeededIds::new(seed))
            .unwrap_or_else(|e| panic!("fixture config rejected: {e}"));
        Self { ledger, seed }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<ReceiptList> {
        self.ledger.snapshot()
    }

    /// Append a receipt holding `lines` and return its id.
    pub fn add_receipt_with_lines(&self, expense_type: &str, lines: &[(&str, f64)]) -> EntityId {
        let list = self.ledger.add_receipt(expense_type);
        let receipt_id = *list.receipts()[list.receipts().len() - 1].id();

        for (name, amount) in lines {
            let list = self.ledger.add_receipt_line(&receipt_id);
            let line_id = last_line_id(&list, &receipt_id);
            self.ledger
                .update_receipt_line(&receipt_id, Line::new(line_id, *name, *amount));
        }
        receipt_id
    }

    /// Rebuild a second ledger from this one's journal and seed.
    pub fn replayed(&self) -> Result<Ledger> {
        Ledger::rebuild(
            self.ledger.config().clone(),
            SeededIds::new(self.seed),
            self.ledger.journal(),
        )
    }
}

impl Default for LedgerFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn last_line_id(list: &ReceiptList, receipt_id: &EntityId) -> EntityId {
    let receipt = list
        .receipt(receipt_id)
        .unwrap_or_else(|| panic!("receipt {receipt_id} missing from fixture"));
    receipt.lines()[receipt.lines().len() - 1].id
}

/// Create fixtures with distinct seeds.
pub fn seeded_fixtures(count: usize) -> Vec<LedgerFixture> {
    (0..count as u64).map(LedgerFixture::with_seed).collect()
}

//! Golden scenarios for end-to-end verification.
//!
//! Each scenario is a small ledger history with hand-computed totals. They
//! are built through the Ledger's named operations so the whole stack is
//! exercised, and the results are checked against the expected summaries.

use tally::Summary;

use crate::fixtures::LedgerFixture;

/// A golden scenario.
#[derive(Debug, Clone)]
pub struct GoldenScenario {
    /// Human-readable name for the scenario.
    pub name: &'static str,
    /// Seed for deterministic ids.
    pub seed: u64,
    /// Receipts to add, in order: expense type and `(name, amount)` lines.
    pub receipts: Vec<(&'static str, Vec<(&'static str, f64)>)>,
    /// Expected list summary.
    pub expected: Summary,
}

/// Get all golden scenarios.
pub fn all_scenarios() -> Vec<GoldenScenario> {
    vec![
        GoldenScenario {
            name: "Empty ledger",
            seed: 0,
            receipts: Vec::new(),
            expected: Summary::EMPTY,
        },
        GoldenScenario {
            name: "One coffee",
            seed: 1,
            receipts: vec![("Food", vec![("Coffee", 4.5)])],
            expected: Summary::new(1, 4.5),
        },
        GoldenScenario {
            name: "Receipt without lines",
            seed: 2,
            receipts: vec![("Entertainment", Vec::new())],
            expected: Summary::new(1, 0.0),
        },
        GoldenScenario {
            name: "Weekly shop",
            seed: 3,
            receipts: vec![
                ("Food", vec![("Bread", 2.5), ("Milk", 1.25), ("Eggs", 3.0)]),
                ("Houseware", vec![("Sponges", 4.0)]),
                ("Entertainment", vec![("Cinema", 11.5), ("Popcorn", 5.75)]),
            ],
            expected: Summary::new(3, 28.0),
        },
        GoldenScenario {
            name: "Unlabelled receipt",
            seed: 4,
            receipts: vec![("", vec![("", 0.0)])],
            expected: Summary::new(1, 0.0),
        },
    ]
}

/// Build a fixture by playing a scenario through the Ledger.
pub fn build_scenario(scenario: &GoldenScenario) -> LedgerFixture {
    let fixture = LedgerFixture::with_seed(scenario.seed);
    for (expense_type, lines) in &scenario.receipts {
        fixture.add_receipt_with_lines(expense_type, lines);
    }
    fixture
}

/// Verify every scenario reaches its expected summary with a consistent tree.
///
/// Returns `(name, passed, fingerprint hex)` per scenario.
pub fn verify_all_scenarios() -> Vec<(String, bool, String)> {
    all_scenarios()
        .iter()
        .map(|s| {
            let fixture = build_scenario(s);
            let list = fixture.snapshot();
            let passed = list.summary() == s.expected && list.is_consistent();
            let hex = fixture
                .ledger
                .fingerprint()
                .map(|fp| fp.to_hex())
                .unwrap_or_default();
            (s.name.to_string(), passed, hex)
        })
        .collect()
}

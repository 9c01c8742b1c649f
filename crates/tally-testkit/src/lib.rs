//! # Tally Testkit
//!
//! Testing utilities for Tally.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Seeded ids**: A reproducible [`IdGenerator`](tally_core::IdGenerator) for replay tests
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//! - **Golden scenarios**: Small histories with hand-computed totals
//!
//! ## Property Testing
//!
//! Scripts are generated as positional steps and resolved against the
//! snapshot they are applied to:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use tally_testkit::generators::script;
//!
//! proptest! {
//!     #[test]
//!     fn summaries_stay_consistent(steps in script(40)) {
//!         let mut list = std::sync::Arc::new(tally_core::ReceiptList::new());
//!         for step in &steps {
//!             let op = step.resolve(&list);
//!             list = tally_core::apply(&list, &op, &mut tally_core::RandomIds);
//!         }
//!         prop_assert!(list.is_consistent());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use tally_testkit::fixtures::LedgerFixture;
//!
//! let fixture = LedgerFixture::with_seed(42);
//! fixture.add_receipt_with_lines("Food", &[("Coffee", 4.5)]);
//! assert_eq!(fixture.snapshot().summary().sum, 4.5);
//! ```

pub mod fixtures;
pub mod generators;
pub mod ids;
pub mod scenarios;

pub use fixtures::{seeded_fixtures, LedgerFixture};
pub use generators::{script, Step};
pub use ids::SeededIds;
pub use scenarios::{all_scenarios, build_scenario, verify_all_scenarios, GoldenScenario};

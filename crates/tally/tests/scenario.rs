//! End-to-end behaviour of the Ledger through its public API.

use std::sync::Arc;

use tally::{EntityId, Ledger, LedgerConfig, Line, Operation, Summary};
use tally_testkit::{LedgerFixture, SeededIds};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_coffee_receipt_lifecycle() {
    init_tracing();
    let ledger = Ledger::new(LedgerConfig::default()).unwrap();

    let list = ledger.add_receipt("Food");
    assert_eq!(list.summary(), Summary::new(1, 0.0));
    let receipt_id = *list.receipts()[0].id();

    let list = ledger.add_receipt_line(&receipt_id);
    let receipt = list.receipt(&receipt_id).unwrap();
    assert_eq!(receipt.summary(), Summary::new(1, 0.0));
    assert_eq!(receipt.lines()[0].name, "");
    assert_eq!(receipt.lines()[0].amount, 0.0);
    let line_id = receipt.lines()[0].id;

    let list = ledger.update_receipt_line(&receipt_id, Line::new(line_id, "Coffee", 4.50));
    assert_eq!(list.receipt(&receipt_id).unwrap().summary(), Summary::new(1, 4.5));
    assert_eq!(list.summary(), Summary::new(1, 4.5));

    let list = ledger.delete_receipt_line(&receipt_id, &line_id);
    assert_eq!(list.receipt(&receipt_id).unwrap().summary(), Summary::new(0, 0.0));
    assert_eq!(list.summary(), Summary::new(1, 0.0));

    let list = ledger.delete_receipt(&receipt_id);
    assert_eq!(list.summary(), Summary::new(0, 0.0));
    assert!(list.receipts().is_empty());
}

#[test]
fn test_expense_type_change_keeps_totals() {
    let fixture = LedgerFixture::with_seed(11);
    let receipt_id = fixture.add_receipt_with_lines("Food", &[("Lamp", 30.0)]);
    let before = fixture.snapshot();

    let after = fixture
        .ledger
        .update_receipt_expense_type(&receipt_id, "Houseware");
    assert_eq!(after.receipt(&receipt_id).unwrap().expense_type(), "Houseware");
    assert_eq!(after.summary(), before.summary());

    // Lines are untouched, so they are shared with the old snapshot.
    assert!(Arc::ptr_eq(
        &before.receipt(&receipt_id).unwrap().lines()[0],
        &after.receipt(&receipt_id).unwrap().lines()[0],
    ));
}

#[test]
fn test_missing_targets_leave_snapshot_alone() {
    let fixture = LedgerFixture::new();
    let receipt_id = fixture.add_receipt_with_lines("Food", &[("Soup", 3.0)]);
    let before = fixture.snapshot();
    let ghost = EntityId::new();

    let ledger = &fixture.ledger;
    assert!(Arc::ptr_eq(&ledger.delete_receipt(&ghost), &before));
    assert!(Arc::ptr_eq(&ledger.add_receipt_line(&ghost), &before));
    assert!(Arc::ptr_eq(&ledger.delete_receipt_line(&receipt_id, &ghost), &before));
    assert!(Arc::ptr_eq(
        &ledger.update_receipt_line(&receipt_id, Line::new(ghost, "Soup", 3.0)),
        &before
    ));
    assert!(Arc::ptr_eq(
        &ledger.update_receipt_expense_type(&receipt_id, "Food"),
        &before
    ));
}

#[test]
fn test_journal_rebuild_reproduces_fingerprint() {
    let fixture = LedgerFixture::with_seed(2024);
    let food = fixture.add_receipt_with_lines("Food", &[("Bread", 2.5), ("Milk", 1.25)]);
    fixture.add_receipt_with_lines("Entertainment", &[("Cinema", 11.5)]);
    fixture.ledger.delete_receipt(&food);

    let journal = fixture.ledger.journal();
    let rebuilt = Ledger::rebuild(LedgerConfig::default(), SeededIds::new(2024), journal).unwrap();

    assert_eq!(rebuilt.snapshot(), fixture.snapshot());
    assert_eq!(
        rebuilt.fingerprint().unwrap(),
        fixture.ledger.fingerprint().unwrap()
    );

    // Journaled operations name concrete ids. Under another id sequence only
    // the receipt adds land; every line edit and the delete miss their target.
    let journal = fixture.ledger.journal();
    let adds = journal
        .iter()
        .filter(|op| matches!(op, Operation::AddReceipt { .. }))
        .count();
    let other = Ledger::rebuild(LedgerConfig::default(), SeededIds::new(2025), journal).unwrap();
    assert_eq!(other.snapshot().summary(), Summary::new(adds, 0.0));
    assert!(other.snapshot().receipts().iter().all(|r| r.lines().is_empty()));
    assert_ne!(
        other.fingerprint().unwrap(),
        fixture.ledger.fingerprint().unwrap()
    );
}

#[test]
fn test_journal_survives_json() {
    let fixture = LedgerFixture::with_seed(5);
    fixture.add_receipt_with_lines("Houseware", &[("Mop", 8.75)]);

    let encoded: Vec<String> = fixture
        .ledger
        .journal()
        .iter()
        .map(|op| op.to_json().unwrap())
        .collect();

    let rebuilt = Ledger::with_ids(LedgerConfig::default(), SeededIds::new(5)).unwrap();
    for json in &encoded {
        rebuilt.dispatch_json(json).unwrap();
    }
    assert_eq!(rebuilt.snapshot(), fixture.snapshot());
}

#[test]
fn test_unrecognized_operation_is_noop() {
    let ledger = Ledger::new(LedgerConfig::default()).unwrap();
    let before = ledger.snapshot();
    let after = ledger.dispatch(Operation::Unrecognized);
    assert!(Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn test_subscribers_see_changes_only() {
    init_tracing();
    let ledger = Ledger::new(LedgerConfig::default()).unwrap();
    let mut rx = ledger.subscribe();
    assert!(!rx.has_changed().unwrap());

    let list = ledger.add_receipt("Food");
    tokio::time::timeout(std::time::Duration::from_secs(1), rx.changed())
        .await
        .expect("no notification")
        .unwrap();
    assert!(Arc::ptr_eq(&rx.borrow_and_update(), &list));

    ledger.delete_receipt(&EntityId::new());
    ledger.update_receipt_expense_type(list.receipts()[0].id(), "Food");
    assert!(!rx.has_changed().unwrap());

    ledger.update_receipt_expense_type(list.receipts()[0].id(), "Houseware");
    assert!(rx.has_changed().unwrap());
    assert_eq!(
        rx.borrow_and_update().receipts()[0].expense_type(),
        "Houseware"
    );
}

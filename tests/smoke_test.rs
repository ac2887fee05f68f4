mod common;

use chrono::{NaiveDate, Utc};
use finance_core::{
    export,
    ledger::{TransactionDraft, TransactionKind},
    storage::{load_or_default, StorageBackend},
};

use common::setup_test_env;

#[test]
fn record_persist_reload_export() {
    finance_core::init();
    let (mut store, storage) = setup_test_env();

    store.add_transaction(TransactionDraft::new(
        TransactionKind::Income,
        800.0,
        "Freelance",
        "Web development project",
        NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
    ));
    store.set_budget(1000.0).unwrap();
    storage.save(&store.persisted_state()).expect("save");

    let (transactions, budget) = load_or_default(&storage);
    assert_eq!(transactions.len(), 1);
    assert_eq!(budget, 1000.0);

    let report = export::csv_report(&transactions, Utc::now());
    assert!(report.contains("Web development project"));
    assert!(report.contains("+$800.00"));
}

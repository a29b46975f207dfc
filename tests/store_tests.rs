// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerlite::errors::LedgerError;
use ledgerlite::models::{Kind, Method, NewRecord, RecordId};
use ledgerlite::store::{self, LedgerStore};
use ledgerlite::view;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

fn empty_ledger() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("transactions.csv");
    std::fs::write(&path, "").unwrap();
    (dir, path)
}

fn record(kind: Kind, amount: i64) -> NewRecord {
    NewRecord {
        date: NaiveDate::from_ymd_opt(2025, 9, 15),
        kind,
        category: "Misc".into(),
        method: Method::DebitCard,
        amount: Decimal::from(amount),
        description: None,
    }
}

#[test]
fn missing_ledger_is_seeded_and_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("transactions.csv");
    let store = LedgerStore::open(&path).unwrap();

    assert_eq!(store.len(), 6);
    assert!(path.exists());
    let seed_date = NaiveDate::from_ymd_opt(2025, 8, 1);
    assert!(store.records().iter().all(|r| r.date == seed_date));

    let s = view::summarize(store.records()).unwrap();
    assert_eq!(s.total_income, Decimal::from(5_000_000));
    assert_eq!(s.total_expense, Decimal::from(2_450_000));
    let incomes = store
        .records()
        .iter()
        .filter(|r| r.kind == Kind::Income)
        .count();
    assert_eq!(incomes, 1);

    let reopened = LedgerStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 6);
}

#[test]
fn ledger_file_has_bom_and_fixed_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("transactions.csv");
    LedgerStore::open(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("date,type,category,method,amount,description")
    );
    assert_eq!(
        lines.next(),
        Some("2025-08-01,Ingreso,Salario,Transferencia,5000000,Pago mensual")
    );
}

#[test]
fn empty_file_opens_as_empty_ledger() {
    let (_dir, path) = empty_ledger();
    let store = LedgerStore::open(&path).unwrap();
    assert!(store.is_empty());
    let s = view::summarize(store.records()).unwrap();
    assert_eq!(s.savings_rate, Decimal::ZERO);
}

#[test]
fn insert_updates_totals_and_savings_rate() {
    let (_dir, path) = empty_ledger();
    let mut store = LedgerStore::open(&path).unwrap();

    store.insert(record(Kind::Income, 1_000_000)).unwrap();
    let after_income = view::summarize(store.records()).unwrap();
    assert_eq!(after_income.total_income, Decimal::from(1_000_000));
    assert_eq!(after_income.total_expense, Decimal::ZERO);

    store.insert(record(Kind::Expense, 400_000)).unwrap();
    let s = view::summarize(store.records()).unwrap();
    assert_eq!(s.total_expense, Decimal::from(400_000));
    assert_eq!(s.balance, Decimal::from(600_000));
    assert_eq!(s.savings_rate, Decimal::from(60));

    let reopened = LedgerStore::open(&path).unwrap();
    assert_eq!(view::summarize(reopened.records()).unwrap(), s);
}

#[test]
fn insert_rejects_negative_amount() {
    let (_dir, path) = empty_ledger();
    let mut store = LedgerStore::open(&path).unwrap();
    let err = store.insert(record(Kind::Expense, -5)).unwrap_err();
    assert!(matches!(err, LedgerError::NegativeAmount(_)));
    assert!(store.is_empty());
}

#[test]
fn persist_and_reload_round_trips() {
    let (_dir, path) = empty_ledger();
    let mut store = LedgerStore::open(&path).unwrap();
    store
        .insert(NewRecord {
            date: NaiveDate::from_ymd_opt(2024, 12, 31),
            kind: Kind::Expense,
            category: "Food, drinks".into(),
            method: Method::CreditCard,
            amount: "12345.67".parse().unwrap(),
            description: Some("Dinner \"La Casa\"".into()),
        })
        .unwrap();
    store.insert(record(Kind::Income, 10)).unwrap();

    let reopened = LedgerStore::open(&path).unwrap();
    assert_eq!(reopened.records(), store.records());
}

#[test]
fn unparseable_dates_load_as_none() {
    let (_dir, path) = empty_ledger();
    std::fs::write(
        &path,
        "date,type,category,method,amount,description\n\
         2025-01-05,Gasto,Food,Efectivo,10,\n\
         someday,Gasto,Food,Efectivo,20,\n",
    )
    .unwrap();
    let store = LedgerStore::open(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.unparsed_dates(), 1);
    assert_eq!(store.records()[1].date, None);
    assert_eq!(
        view::summarize(store.records()).unwrap().total_expense,
        Decimal::from(30)
    );
}

#[test]
fn corrupt_ledger_fails_to_open() {
    let (_dir, path) = empty_ledger();
    std::fs::write(
        &path,
        "date,type,category,method,amount,description\n2025-01-05,Refund,Food,Efectivo,10,\n",
    )
    .unwrap();
    let err = LedgerStore::open(&path).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidRow { row: 2, .. }));
}

#[test]
fn remove_deletes_exactly_one_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("transactions.csv");
    let mut store = LedgerStore::open(&path).unwrap();
    let target = store.records()[2].clone();

    let removed = store.remove(target.id).unwrap();
    assert_eq!(removed, target);
    assert_eq!(store.len(), 5);
    assert!(store.get(target.id).is_none());

    let reopened = LedgerStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 5);
    assert!(
        reopened
            .records()
            .iter()
            .all(|r| r.category != target.category)
    );
}

#[test]
fn remove_unknown_id_leaves_ledger_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("transactions.csv");
    let mut store = LedgerStore::open(&path).unwrap();
    let before = std::fs::read(&path).unwrap();

    let err = store.remove(RecordId(999)).unwrap_err();
    assert!(matches!(err, LedgerError::UnknownRecord(RecordId(999))));
    assert_eq!(store.len(), 6);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn ids_stay_stable_after_removal() {
    let (_dir, path) = empty_ledger();
    let mut store = LedgerStore::open(&path).unwrap();
    let a = store.insert(record(Kind::Income, 1)).unwrap();
    let b = store.insert(record(Kind::Expense, 2)).unwrap();
    store.remove(a).unwrap();
    let c = store.insert(record(Kind::Expense, 3)).unwrap();

    assert!(c > b);
    assert_eq!(store.get(b).unwrap().amount, Decimal::from(2));
}

/// Swaps the ledger file for a directory so the next write fails.
fn block_writes(path: &std::path::Path) {
    std::fs::remove_file(path).unwrap();
    std::fs::create_dir(path).unwrap();
}

#[test]
fn failed_write_leaves_memory_unchanged() {
    let (_dir, path) = empty_ledger();
    let mut store = LedgerStore::open(&path).unwrap();
    let kept = store.insert(record(Kind::Income, 100)).unwrap();
    block_writes(&path);

    assert!(matches!(
        store.insert(record(Kind::Expense, 5)),
        Err(LedgerError::Io(_))
    ));
    assert_eq!(store.len(), 1);

    let csv = "date,type,category,method,amount,description\n\
               2025-09-01,Gasto,Comida,Efectivo,10,\n";
    assert!(store.import_reader(csv.as_bytes()).is_err());
    assert_eq!(store.len(), 1);

    assert!(store.remove(kept).is_err());
    assert_eq!(store.len(), 1);
    assert!(store.get(kept).is_some());
    assert!(!store::temp_path(&path).exists());

    std::fs::remove_dir(&path).unwrap();
    let next = store.insert(record(Kind::Expense, 5)).unwrap();
    assert_eq!(next, RecordId(kept.0 + 1));
    assert_eq!(LedgerStore::open(&path).unwrap().len(), 2);
}

#[test]
fn temp_file_keeps_the_full_name() {
    let dir = tempdir().unwrap();
    let txt = dir.path().join("ledger.txt");
    assert_eq!(store::temp_path(&txt), dir.path().join("ledger.txt.tmp"));
    assert_ne!(
        store::temp_path(&txt),
        store::temp_path(&dir.path().join("ledger.csv"))
    );

    let store = LedgerStore::open(&txt).unwrap();
    assert_eq!(store.len(), 6);
    assert!(txt.exists());
    assert!(!dir.path().join("ledger.txt.tmp").exists());
}

#[test]
fn tracing_init_tolerates_existing_subscriber() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    ledgerlite::utils::init_tracing();
    ledgerlite::utils::init_tracing();
}

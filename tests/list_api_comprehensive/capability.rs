//! Read-only View Tests
//!
//! A view built from a snapshot may read but never write.

use crate::common::*;

#[test]
fn every_mutation_fails_on_read_only_view() {
    let t = TestStore::new();
    t.rpush(b"k", &["a", "b", "c"]);
    let version = t.store.version();

    let results = vec![
        t.read(|tx| tx.lpush(b"k", &["x"])).unwrap_err(),
        t.read(|tx| tx.rpush(b"k", &["x"])).unwrap_err(),
        t.read(|tx| tx.lpop(b"k").map(|_| ())).unwrap_err(),
        t.read(|tx| tx.rpop(b"k").map(|_| ())).unwrap_err(),
        t.read(|tx| tx.lset(b"k", 0, b"x")).unwrap_err(),
        t.read(|tx| tx.lclear(b"k")).unwrap_err(),
    ];
    for err in results {
        assert_eq!(err, Error::ReadOnlyTransaction);
        assert!(err.is_read_only());
        assert!(!err.is_retryable());
    }

    assert_eq!(t.store.version(), version);
    assert_eq!(t.contents(b"k"), vec!["a", "b", "c"]);
}

#[test]
fn read_only_rejection_precedes_other_checks() {
    let t = TestStore::new();

    // Empty input and absent lists would otherwise be no-ops
    let none: [&str; 0] = [];
    assert_eq!(
        t.read(|tx| tx.rpush(b"absent", &none)),
        Err(Error::ReadOnlyTransaction)
    );
    assert_eq!(
        t.read(|tx| tx.lclear(b"absent")),
        Err(Error::ReadOnlyTransaction)
    );
    assert_eq!(
        t.read(|tx| tx.lpop(b"absent")),
        Err(Error::ReadOnlyTransaction)
    );

    // Out-of-range set reports the capability first
    assert_eq!(
        t.read(|tx| tx.lset(b"absent", 99, b"x")),
        Err(Error::ReadOnlyTransaction)
    );
}

#[test]
fn reads_work_on_both_view_kinds() {
    let t = TestStore::new();
    t.rpush(b"k", &["a", "b"]);

    let from_snapshot = t
        .read(|tx| Ok((tx.llen(b"k")?, tx.lindex(b"k", 1)?)))
        .unwrap();
    let from_txn = t
        .write(|tx| Ok((tx.llen(b"k")?, tx.lindex(b"k", 1)?)))
        .unwrap();

    assert_eq!(from_snapshot, (2, v("b")));
    assert_eq!(from_snapshot, from_txn);
}

#[test]
fn view_reports_its_capability() {
    let t = TestStore::new();

    let snapshot = t.store.snapshot();
    assert!(TxStructure::read_only(&snapshot, &t.config).is_read_only());

    let mut txn = t.store.begin();
    assert!(!TxStructure::read_write(&mut txn, &t.config).is_read_only());
    txn.abort("test done");
}

#[test]
fn read_only_view_over_open_transaction() {
    let t = TestStore::new();
    let mut txn = t.store.begin();
    TxStructure::read_write(&mut txn, &t.config)
        .rpush(b"k", &["pending"])
        .unwrap();

    // A read-only view of the same transaction sees its own writes
    let mut tx = TxStructure::read_only(&txn, &t.config);
    assert_eq!(tx.lindex(b"k", 0).unwrap(), v("pending"));
    assert_eq!(tx.lpop(b"k"), Err(Error::ReadOnlyTransaction));
    assert_eq!(tx.llen(b"k").unwrap(), 1);

    txn.abort("test done");
    assert_eq!(t.llen(b"k"), 0);
}

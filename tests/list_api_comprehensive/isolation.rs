//! Isolation Tests
//!
//! Prefix partitioning, sibling lists, snapshot visibility and rollback.

use crate::common::*;

#[test]
fn prefixes_partition_the_keyspace() {
    let t = TestStore::with_prefix("a");
    let other = StructureConfig::new().with_prefix("b");

    t.rpush(b"k", &["from-a"]);
    t.store
        .update(|txn| TxStructure::read_write(txn, &other).rpush(b"k", &["from-b", "more"]))
        .unwrap();

    assert_eq!(t.contents(b"k"), vec!["from-a"]);
    let other_len = t
        .store
        .view(|snap| TxStructure::read_only(snap, &other).llen(b"k"))
        .unwrap();
    assert_eq!(other_len, 2);

    assert_eq!(t.store.keys_with_prefix(b"a").len(), 2);
    assert_eq!(t.store.keys_with_prefix(b"b").len(), 3);
}

#[test]
fn sibling_lists_do_not_interfere() {
    let t = TestStore::new();
    t.rpush(b"a", &["1", "2"]);
    t.rpush(b"ab", &["3"]);
    t.lpush(b"a\x00", &["4"]);

    t.write(|tx| tx.lclear(b"a")).unwrap();

    assert_eq!(t.llen(b"a"), 0);
    assert_eq!(t.contents(b"ab"), vec!["3"]);
    assert_eq!(t.contents(b"a\x00"), vec!["4"]);
}

#[test]
fn snapshot_does_not_see_later_commits() {
    let t = TestStore::new();
    t.rpush(b"k", &["a"]);
    let snapshot = t.store.snapshot();

    t.rpush(b"k", &["b"]);
    t.write(|tx| tx.lpop(b"k")).unwrap();

    let old = TxStructure::read_only(&snapshot, &t.config);
    assert_eq!(old.llen(b"k").unwrap(), 1);
    assert_eq!(old.lindex(b"k", 0).unwrap(), v("a"));
    assert_eq!(t.contents(b"k"), vec!["b"]);
}

#[test]
fn failed_closure_rolls_back_every_write() {
    let t = TestStore::new();
    t.rpush(b"k", &["keep"]);
    let version = t.store.version();

    let err = t
        .write(|tx| {
            tx.rpush(b"k", &["x", "y", "z"])?;
            tx.lpop(b"k")?;
            tx.lset(b"k", 100, b"boom")
        })
        .unwrap_err();

    assert_eq!(err, Error::ListIndexOutOfRange { index: 100 });
    assert_eq!(t.store.version(), version);
    assert_eq!(t.contents(b"k"), vec!["keep"]);
}

#[test]
fn uncommitted_writes_are_invisible() {
    let t = TestStore::new();
    let mut txn = t.store.begin();
    TxStructure::read_write(&mut txn, &t.config)
        .rpush(b"k", &["a", "b"])
        .unwrap();

    assert_eq!(t.llen(b"k"), 0);
    txn.commit().unwrap();
    assert_eq!(t.llen(b"k"), 2);
}

#[test]
fn one_transaction_spans_many_lists() {
    let t = TestStore::new();
    t.rpush(b"src", &["a", "b", "c"]);

    // Move the tail of one list to the head of another atomically
    t.write(|tx| {
        while let Some(value) = tx.rpop(b"src")? {
            tx.lpush(b"dst", &[value])?;
        }
        Ok(())
    })
    .unwrap();

    assert_eq!(t.llen(b"src"), 0);
    assert_eq!(t.contents(b"dst"), vec!["a", "b", "c"]);
}

#[test]
fn binary_prefixes_partition_the_keyspace() {
    let t = TestStore::new();
    let high = StructureConfig::new().with_prefix(vec![0xFF, 0x00]);
    let low = StructureConfig::new().with_prefix(vec![0xFF]);

    for (config, value) in [(&high, "high"), (&low, "low")] {
        t.store
            .update(|txn| TxStructure::read_write(txn, config).rpush(b"k", &[value]))
            .unwrap();
    }

    let read = |config: &StructureConfig| {
        t.store
            .view(|snap| TxStructure::read_only(snap, config).lindex(b"k", 0))
            .unwrap()
    };
    assert_eq!(read(&high), v("high"));
    assert_eq!(read(&low), v("low"));
    assert_eq!(t.store.keys_with_prefix(&[0xFF, 0x00]).len(), 2);
}

//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::{Arc, Once};
pub use structdb::prelude::*;
pub use structdb::{KeyEncoder, Side, StructureKind};

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness writer
///
/// Set `RUST_LOG`-style verbosity with `STRUCTDB_TEST_LOG=debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let level = match std::env::var("STRUCTDB_TEST_LOG").as_deref() {
            Ok("trace") => tracing::Level::TRACE,
            Ok("debug") => tracing::Level::DEBUG,
            Ok("info") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .try_init();
    });
}

/// A fresh store plus the structure config every helper uses
pub struct TestStore {
    pub store: Arc<MemoryStore>,
    pub config: StructureConfig,
}

impl TestStore {
    pub fn new() -> Self {
        Self::with_prefix("test")
    }

    pub fn with_prefix(prefix: &str) -> Self {
        init_tracing();
        Self {
            store: MemoryStore::shared(),
            config: StructureConfig::new().with_prefix(prefix),
        }
    }

    pub fn keys(&self) -> KeyEncoder {
        KeyEncoder::new(self.config.prefix.clone())
    }

    /// Run `f` on a read-write view inside one committed transaction
    pub fn write<T>(&self, f: impl FnOnce(&mut TxStructure<'_>) -> Result<T>) -> Result<T> {
        self.store.update(|txn| {
            let mut tx = TxStructure::read_write(txn, &self.config);
            f(&mut tx)
        })
    }

    /// Run `f` on a read-only view of the latest committed state
    pub fn read<T>(&self, f: impl FnOnce(&mut TxStructure<'_>) -> Result<T>) -> Result<T> {
        self.store.view(|snapshot| {
            let mut tx = TxStructure::read_only(snapshot, &self.config);
            f(&mut tx)
        })
    }

    pub fn rpush(&self, key: &[u8], values: &[&str]) {
        self.write(|tx| tx.rpush(key, values)).unwrap();
    }

    pub fn lpush(&self, key: &[u8], values: &[&str]) {
        self.write(|tx| tx.lpush(key, values)).unwrap();
    }

    pub fn llen(&self, key: &[u8]) -> i64 {
        self.read(|tx| tx.llen(key)).unwrap()
    }

    pub fn meta(&self, key: &[u8]) -> ListMeta {
        self.read(|tx| tx.list_meta(key)).unwrap()
    }

    /// Every element from head to tail, read through `lindex`
    pub fn contents(&self, key: &[u8]) -> Vec<String> {
        self.read(|tx| {
            let len = tx.llen(key)?;
            let mut out = Vec::new();
            for i in 0..len {
                let value = tx.lindex(key, i)?.expect("live index must hold a value");
                out.push(String::from_utf8(value).expect("test values are utf-8"));
            }
            Ok(out)
        })
        .unwrap()
    }

    /// Store keys that belong to `key`'s list, meta included
    pub fn list_keys(&self, key: &[u8]) -> Vec<Vec<u8>> {
        let meta_key = self.keys().encode_list_meta_key(key);
        let data_prefix = self.keys().encode(key, StructureKind::ListData);
        let mut keys = self.store.keys_with_prefix(&data_prefix);
        if self.store.contains(&meta_key) {
            keys.push(meta_key);
        }
        keys
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte-string helper for comparing popped values
pub fn v(s: &str) -> Option<Vec<u8>> {
    Some(s.as_bytes().to_vec())
}

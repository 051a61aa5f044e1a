//! In-memory ordered store
//!
//! `MemoryStore` is the committed state of the keyspace: a `BTreeMap` under a
//! `RwLock`, plus the counters and lock that coordinate commits.
//!
//! # Design
//!
//! - BTreeMap: ordered keyspace, cheap to clone for snapshots
//! - Global version: incremented once per committed write transaction; every
//!   key written by that transaction carries the same version
//! - Commit lock: serializes validate → apply so no other transaction can
//!   change storage between the two steps
//!
//! Readers never take the commit lock. They only hold the read lock long
//! enough to clone the map (see [`Snapshot`]).

use crate::snapshot::Snapshot;
use crate::transaction::Transaction;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use structdb_core::Result;
use tracing::debug;

/// A committed value together with the version of the transaction that
/// wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    /// Raw value bytes
    pub value: Vec<u8>,
    /// Commit version of the writing transaction
    pub version: u64,
}

/// Transactional in-memory key-value store
///
/// # Thread Safety
///
/// All methods take `&self`; share the store between threads with `Arc`.
///
/// # Example
///
/// ```
/// use structdb_core::{Mutator, Retriever};
/// use structdb_storage::MemoryStore;
///
/// let store = MemoryStore::new();
/// store.update(|txn| txn.set(b"k", b"v")).unwrap();
///
/// let value = store.view(|snap| snap.get(b"k")).unwrap();
/// assert_eq!(value, Some(b"v".to_vec()));
/// ```
pub struct MemoryStore {
    pub(crate) data: RwLock<BTreeMap<Vec<u8>, VersionedValue>>,
    version: AtomicU64,
    next_txn_id: AtomicU64,
    pub(crate) commit_lock: Mutex<()>,
}

impl MemoryStore {
    /// Create an empty store at version 0
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            version: AtomicU64::new(0),
            next_txn_id: AtomicU64::new(1),
            commit_lock: Mutex::new(()),
        }
    }

    /// Create an empty store wrapped in an `Arc` for sharing across threads
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Current committed version
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Allocate the version for a committing transaction
    ///
    /// Must only be called while holding the commit lock.
    #[inline]
    pub(crate) fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[inline]
    pub(crate) fn next_txn_id(&self) -> u64 {
        self.next_txn_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of committed keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if no keys are committed
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Read the committed value and version for a key, outside any transaction
    pub fn get_versioned(&self, key: &[u8]) -> Option<VersionedValue> {
        self.data.read().get(key).cloned()
    }

    /// Check if a key is committed, outside any transaction
    pub fn contains(&self, key: &[u8]) -> bool {
        self.data.read().contains_key(key)
    }

    /// Committed keys starting with `prefix`, in key order
    ///
    /// Diagnostic helper; the structure layer never scans.
    pub fn keys_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.data
            .read()
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Write a raw committed value, bypassing transactions
    ///
    /// Allocates a fresh version so open transactions that read `key`
    /// will conflict. Intended for fixtures and repair tooling.
    pub fn put_raw(&self, key: &[u8], value: &[u8]) -> u64 {
        let _guard = self.commit_lock.lock();
        let version = self.next_version();
        self.data.write().insert(
            key.to_vec(),
            VersionedValue {
                value: value.to_vec(),
                version,
            },
        );
        version
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Take a read-only snapshot of the current committed state
    pub fn snapshot(&self) -> Snapshot {
        let data = self.data.read();
        Snapshot::new(self.version(), data.clone())
    }

    /// Begin a read-write transaction
    pub fn begin(&self) -> Transaction<'_> {
        let txn_id = self.next_txn_id();
        let snapshot = self.snapshot();
        debug!(txn_id, start_version = snapshot.version(), "transaction started");
        Transaction::new(self, txn_id, snapshot)
    }

    /// Run `f` against a read-only snapshot
    pub fn view<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Snapshot) -> Result<T>,
    {
        let snapshot = self.snapshot();
        f(&snapshot)
    }

    /// Run `f` inside a read-write transaction
    ///
    /// Commits if `f` returns `Ok`, aborts otherwise. A commit conflict is
    /// returned as [`structdb_core::Error::TransactionConflict`]; there is
    /// no automatic retry.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T>,
    {
        let mut txn = self.begin();
        match f(&mut txn) {
            Ok(value) => {
                txn.commit()?;
                Ok(value)
            }
            Err(e) => {
                txn.abort(format!("closure failed: {}", e));
                Err(e)
            }
        }
    }

    /// Apply a validated write set at `version`
    ///
    /// `None` values are deletes. Caller must hold the commit lock.
    pub(crate) fn apply_writes(&self, writes: &BTreeMap<Vec<u8>, Option<Vec<u8>>>, version: u64) {
        let mut data = self.data.write();
        for (key, value) in writes {
            match value {
                Some(value) => {
                    data.insert(
                        key.clone(),
                        VersionedValue {
                            value: value.clone(),
                            version,
                        },
                    );
                }
                None => {
                    data.remove(key);
                }
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("version", &self.version())
            .field("len", &self.len())
            .finish()
    }
}

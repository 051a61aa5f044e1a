//! Read-write transactions with optimistic concurrency control
//!
//! A `Transaction` reads from a private [`Snapshot`], buffers its writes,
//! and only touches the shared store at commit.
//!
//! ## Commit Sequence
//!
//! ```text
//! 1. Acquire the store's commit lock
//! 2. Validate the read set (first-committer-wins)
//! 3. IF conflicts: mark Aborted, return TransactionConflict
//! 4. Allocate commit version (skipped for read-only transactions)
//! 5. Apply the write set under the store's write lock
//! 6. Mark Committed, release lock
//! ```
//!
//! Either every buffered write becomes visible, or none does.

use crate::snapshot::Snapshot;
use crate::store::MemoryStore;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use structdb_core::{Error, Mutator, Result, Retriever};
use tracing::debug;

/// Transaction lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Accepting reads and writes
    Active,
    /// Successfully committed at the given version
    Committed {
        /// Version the write set was applied at
        version: u64,
    },
    /// Discarded; buffered writes were dropped
    Aborted {
        /// Human-readable reason
        reason: String,
    },
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Active => write!(f, "active"),
            TransactionStatus::Committed { version } => write!(f, "committed at {}", version),
            TransactionStatus::Aborted { reason } => write!(f, "aborted: {}", reason),
        }
    }
}

/// Read-write transaction over a [`MemoryStore`]
///
/// # Read Set
///
/// Every key read from the snapshot (not from the transaction's own
/// writes) is recorded with the version it was read at; a missing key is
/// recorded as version 0. Commit fails if any of those keys has a
/// different version in the store by then.
pub struct Transaction<'s> {
    store: &'s MemoryStore,
    txn_id: u64,
    snapshot: Snapshot,
    read_set: Mutex<FxHashMap<Vec<u8>, u64>>,
    /// `None` marks a buffered delete
    write_set: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
    status: TransactionStatus,
}

impl<'s> Transaction<'s> {
    pub(crate) fn new(store: &'s MemoryStore, txn_id: u64, snapshot: Snapshot) -> Self {
        Self {
            store,
            txn_id,
            snapshot,
            read_set: Mutex::new(FxHashMap::default()),
            write_set: BTreeMap::new(),
            status: TransactionStatus::Active,
        }
    }

    /// Unique transaction id
    pub fn txn_id(&self) -> u64 {
        self.txn_id
    }

    /// Store version this transaction reads from
    pub fn start_version(&self) -> u64 {
        self.snapshot.version()
    }

    /// Current lifecycle state
    pub fn status(&self) -> &TransactionStatus {
        &self.status
    }

    /// Check if the transaction still accepts operations
    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Active
    }

    /// Number of buffered writes and deletes
    pub fn pending_writes(&self) -> usize {
        self.write_set.len()
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(Error::TransactionNotActive(self.status.to_string()))
        }
    }

    /// Validate and apply this transaction
    ///
    /// # Returns
    /// - `Ok(version)`: the commit version, or the start version if
    ///   nothing was written
    /// - `Err(TransactionConflict)`: a key in the read set changed; the
    ///   transaction is now aborted
    /// - `Err(TransactionNotActive)`: already committed or aborted
    pub fn commit(&mut self) -> Result<u64> {
        self.ensure_active()?;

        // Hold the lock across validate and apply so no other commit can
        // slip in between them.
        let _commit_guard = self.store.commit_lock.lock();

        if let Err(e) = self.validate() {
            debug!(txn_id = self.txn_id, error = %e, "transaction aborted on validation");
            self.status = TransactionStatus::Aborted {
                reason: e.to_string(),
            };
            self.write_set.clear();
            return Err(e);
        }

        if self.write_set.is_empty() {
            let version = self.snapshot.version();
            self.status = TransactionStatus::Committed { version };
            return Ok(version);
        }

        let version = self.store.next_version();
        self.store.apply_writes(&self.write_set, version);
        debug!(
            txn_id = self.txn_id,
            commit_version = version,
            writes = self.write_set.len(),
            "transaction committed"
        );
        self.status = TransactionStatus::Committed { version };
        self.write_set.clear();
        Ok(version)
    }

    /// Discard all buffered writes
    ///
    /// No-op if the transaction is no longer active.
    pub fn abort(&mut self, reason: impl Into<String>) {
        if !self.is_active() {
            return;
        }
        let reason = reason.into();
        debug!(txn_id = self.txn_id, reason = %reason, "transaction aborted");
        self.write_set.clear();
        self.status = TransactionStatus::Aborted { reason };
    }

    fn validate(&self) -> Result<()> {
        let data = self.store.data.read();
        for (key, read_version) in self.read_set.lock().iter() {
            let current = data.get(key).map(|v| v.version).unwrap_or(0);
            if current != *read_version {
                return Err(Error::TransactionConflict(format!(
                    "key {} read at version {}, now at version {}",
                    key.escape_ascii(),
                    read_version,
                    current
                )));
            }
        }
        Ok(())
    }
}

impl Retriever for Transaction<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.ensure_active()?;

        if let Some(buffered) = self.write_set.get(key) {
            return Ok(buffered.clone());
        }

        let found = self.snapshot.get_versioned(key);
        self.read_set
            .lock()
            .entry(key.to_vec())
            .or_insert_with(|| found.map(|v| v.version).unwrap_or(0));
        Ok(found.map(|v| v.value.clone()))
    }
}

impl Mutator for Transaction<'_> {
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.ensure_active()?;
        self.write_set.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.ensure_active()?;
        self.write_set.insert(key.to_vec(), None);
        Ok(())
    }
}

impl std::fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("txn_id", &self.txn_id)
            .field("start_version", &self.start_version())
            .field("pending_writes", &self.write_set.len())
            .field("status", &self.status)
            .finish()
    }
}

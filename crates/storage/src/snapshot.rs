//! Read-only snapshot
//!
//! A `Snapshot` is a cloned, immutable copy of the committed keyspace taken
//! at one version. Later commits are invisible to it, which gives every
//! transaction a stable view without holding any lock.

use crate::store::VersionedValue;
use std::collections::BTreeMap;
use structdb_core::{Result, Retriever};

/// Point-in-time view of a [`crate::MemoryStore`]
///
/// Implements [`Retriever`] only: a snapshot is the engine's read-only
/// transaction.
#[derive(Debug, Clone)]
pub struct Snapshot {
    version: u64,
    data: BTreeMap<Vec<u8>, VersionedValue>,
}

impl Snapshot {
    pub(crate) fn new(version: u64, data: BTreeMap<Vec<u8>, VersionedValue>) -> Self {
        Self { version, data }
    }

    /// Version of the store when this snapshot was taken
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Read a value with the version that wrote it
    pub fn get_versioned(&self, key: &[u8]) -> Option<&VersionedValue> {
        self.data.get(key)
    }

    /// Number of keys visible in this snapshot
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Retriever for Snapshot {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.get(key).map(|v| v.value.clone()))
    }
}

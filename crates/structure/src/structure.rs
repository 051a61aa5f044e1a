//! Transaction-scoped structure view
//!
//! `TxStructure` is a stateless facade over one caller-held transaction. It
//! owns no data and no locks: every operation is a sequence of point reads,
//! writes and deletes issued through the transaction, which commits or
//! aborts them as a unit.
//!
//! # Example
//!
//! ```
//! use structdb_storage::MemoryStore;
//! use structdb_structure::{StructureConfig, TxStructure};
//!
//! let store = MemoryStore::new();
//! let config = StructureConfig::new().with_prefix("m");
//!
//! store
//!     .update(|txn| {
//!         let mut tx = TxStructure::read_write(txn, &config);
//!         tx.rpush(b"jobs", &["a", "b", "c"])
//!     })
//!     .unwrap();
//!
//! let snapshot = store.snapshot();
//! let tx = TxStructure::read_only(&snapshot, &config);
//! assert_eq!(tx.llen(b"jobs").unwrap(), 3);
//! assert_eq!(tx.lindex(b"jobs", -1).unwrap(), Some(b"c".to_vec()));
//! ```

use crate::access::Access;
use crate::config::StructureConfig;
use crate::keys::KeyEncoder;
use structdb_core::{Mutator, Retriever};

/// Structure operations bound to one transaction
pub struct TxStructure<'a> {
    pub(crate) access: Access<'a>,
    pub(crate) keys: KeyEncoder,
}

impl<'a> TxStructure<'a> {
    /// View that can only read
    ///
    /// Mutating operations on this view fail with
    /// [`structdb_core::Error::ReadOnlyTransaction`] and issue no writes.
    pub fn read_only(reader: &'a dyn Retriever, config: &StructureConfig) -> Self {
        Self {
            access: Access::ReadOnly(reader),
            keys: config.key_encoder(),
        }
    }

    /// View that can read and write
    pub fn read_write(writer: &'a mut dyn Mutator, config: &StructureConfig) -> Self {
        Self {
            access: Access::ReadWrite(writer),
            keys: config.key_encoder(),
        }
    }

    /// Check if mutating operations are rejected
    pub fn is_read_only(&self) -> bool {
        self.access.is_read_only()
    }

    /// Key encoder used by this view
    pub fn key_encoder(&self) -> &KeyEncoder {
        &self.keys
    }
}

impl std::fmt::Debug for TxStructure<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxStructure")
            .field("read_only", &self.is_read_only())
            .field("prefix", &self.keys.prefix().escape_ascii().to_string())
            .finish()
    }
}

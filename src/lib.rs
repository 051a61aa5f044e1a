//! # structdb
//!
//! Transactional data structures persisted as key-value pairs.
//!
//! A structure never holds state between calls. Each operation reads and
//! writes records through one caller-held transaction, so everything it
//! does commits or rolls back with that transaction.
//!
//! ## Quick Start
//!
//! ```
//! use structdb::prelude::*;
//!
//! let store = MemoryStore::new();
//! let config = StructureConfig::new().with_prefix("m");
//!
//! store
//!     .update(|txn| {
//!         let mut tx = TxStructure::read_write(txn, &config);
//!         tx.rpush(b"queue", &["a", "b"])?;
//!         tx.lpush(b"queue", &["z"])?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let popped = store
//!     .update(|txn| TxStructure::read_write(txn, &config).lpop(b"queue"))
//!     .unwrap();
//! assert_eq!(popped, Some(b"z".to_vec()));
//! ```
//!
//! ## Crates
//!
//! - [`structdb_core`]: error taxonomy and the `Retriever` / `Mutator`
//!   transaction traits
//! - [`structdb_storage`]: in-memory transactional engine
//! - [`structdb_structure`]: the structure layer (lists)

#![warn(missing_docs)]

pub mod prelude;

pub use structdb_core::{Error, Mutator, Result, Retriever};
pub use structdb_storage::{MemoryStore, Snapshot, Transaction, TransactionStatus};
pub use structdb_structure::{
    KeyEncoder, ListMeta, Side, StructureConfig, StructureKind, TxStructure, LIST_META_SIZE,
};

pub use structdb_core;
pub use structdb_storage;
pub use structdb_structure;

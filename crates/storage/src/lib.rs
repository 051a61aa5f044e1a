//! Storage layer for structdb
//!
//! This crate implements a transactional, ordered, in-memory key-value
//! engine:
//! - MemoryStore: BTreeMap-based committed state with RwLock
//! - Snapshot: cloned point-in-time view, the read-only transaction
//! - Transaction: buffered writes, read-your-own-writes, and
//!   first-committer-wins validation at commit
//!
//! Both transaction kinds implement the `structdb-core` access traits, so
//! any structure built on those traits runs on this engine unchanged.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod snapshot;
pub mod store;
pub mod transaction;

pub use snapshot::Snapshot;
pub use store::{MemoryStore, VersionedValue};
pub use transaction::{Transaction, TransactionStatus};

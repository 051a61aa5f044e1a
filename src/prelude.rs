//! Convenient imports for structdb.
//!
//! ```
//! use structdb::prelude::*;
//!
//! let store = MemoryStore::new();
//! let snapshot = store.snapshot();
//! let tx = TxStructure::read_only(&snapshot, &StructureConfig::default());
//! assert_eq!(tx.llen(b"missing").unwrap(), 0);
//! ```

// Error handling
pub use crate::{Error, Result};

// Transaction traits
pub use crate::{Mutator, Retriever};

// Engine
pub use crate::{MemoryStore, Snapshot, Transaction};

// Structures
pub use crate::{ListMeta, StructureConfig, TxStructure};

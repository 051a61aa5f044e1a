//! Error types for structdb
//!
//! One error enum is shared by every layer of the workspace:
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | ReadOnlyTransaction | structure | Mutation issued through a read-only view |
//! | CorruptListMeta | structure | Stored list meta is not the 16-byte layout |
//! | CorruptListData | structure | A live index has no data record |
//! | ListIndexOutOfRange | structure | `lset` addressed an index outside the window |
//! | ListIndexOverflow | structure | A push would move an index past the i64 range |
//! | TransactionConflict | storage | Read set changed before commit |
//! | TransactionNotActive | storage | Operation on a committed or aborted transaction |
//! | Storage | storage | Any other engine failure |
//! | InvalidConfig | structure | Configuration could not be parsed |
//!
//! "Key not found" is deliberately absent: the storage interface reports a
//! missing key as `Ok(None)`.

use thiserror::Error;

/// All structdb errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A mutating operation was invoked on a read-only view.
    #[error("write operation on read-only transaction")]
    ReadOnlyTransaction,

    /// A stored list meta value does not decode to two 64-bit integers.
    #[error("corrupt list meta for key {key}: expected 16 bytes, got {actual}")]
    CorruptListMeta {
        /// Structure key, ASCII-escaped
        key: String,
        /// Length of the stored value
        actual: usize,
    },

    /// An index inside the live window has no data record.
    #[error("corrupt list data for key {key}: no record at live index {index}")]
    CorruptListData {
        /// Structure key, ASCII-escaped
        key: String,
        /// Absolute index of the missing record
        index: i64,
    },

    /// `lset` addressed an index outside the live window.
    #[error("list index {index} out of range")]
    ListIndexOutOfRange {
        /// Index as supplied by the caller (before adjustment)
        index: i64,
    },

    /// Growing the list would overflow a 64-bit window bound.
    #[error("list index overflow: {0}")]
    ListIndexOverflow(String),

    /// First-committer-wins validation failed.
    #[error("transaction conflict: {0}")]
    TransactionConflict(String),

    /// The transaction was already committed or aborted.
    #[error("transaction not active ({0})")]
    TransactionNotActive(String),

    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for structdb operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::CorruptListMeta`] for a raw structure key.
    pub fn corrupt_list_meta(key: &[u8], actual: usize) -> Self {
        Error::CorruptListMeta {
            key: key.escape_ascii().to_string(),
            actual,
        }
    }

    /// Build a [`Error::CorruptListData`] for a raw structure key.
    pub fn corrupt_list_data(key: &[u8], index: i64) -> Self {
        Error::CorruptListData {
            key: key.escape_ascii().to_string(),
            index,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only conflicts may succeed when the whole transaction is re-run
    /// against fresh data. Retrying is always the caller's decision.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::TransactionConflict(_))
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::TransactionConflict(_))
    }

    /// Check if a mutation was rejected by the capability gate.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Error::ReadOnlyTransaction)
    }

    /// Check if the stored data for a structure is unreadable.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::CorruptListMeta { .. } | Error::CorruptListData { .. }
        )
    }
}

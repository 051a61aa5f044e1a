//! Storage access traits
//!
//! These are the only operations the structure layer needs from a
//! transactional engine. Both are scoped to a single caller-held
//! transaction:
//!
//! - [`Retriever`]: point reads, available on every transaction
//! - [`Mutator`]: point writes and deletes, available on read-write
//!   transactions only
//!
//! Engines report a missing key as `Ok(None)`; `Err` is reserved for real
//! failures and is passed through the structure layer unchanged.

use crate::error::Result;

/// Read access to one transaction's view of the keyspace.
pub trait Retriever {
    /// Get the value stored at `key`, or `None` if the key does not exist.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
}

/// Read-write access to one transaction's view of the keyspace.
///
/// Writes must be visible to subsequent [`Retriever::get`] calls on the
/// same transaction (read-your-own-writes).
pub trait Mutator: Retriever {
    /// Store `value` at `key`, replacing any previous value.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove `key`. Deleting a missing key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<()>;
}

impl<T: Retriever + ?Sized> Retriever for &T {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }
}

impl<T: Retriever + ?Sized> Retriever for &mut T {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }
}

impl<T: Mutator + ?Sized> Mutator for &mut T {
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }
}

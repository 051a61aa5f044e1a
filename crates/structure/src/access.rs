//! Capability gate
//!
//! A structure view is bound to one transaction at construction, either
//! read-only ([`Retriever`]) or read-write ([`Mutator`]). Every mutating
//! operation resolves its writer through [`Access::mutator`], which is the
//! single place a read-only view is rejected.

use structdb_core::{Error, Mutator, Result, Retriever};

pub(crate) enum Access<'a> {
    ReadOnly(&'a dyn Retriever),
    ReadWrite(&'a mut dyn Mutator),
}

impl<'a> Access<'a> {
    pub(crate) fn is_read_only(&self) -> bool {
        matches!(self, Access::ReadOnly(_))
    }

    /// The writer, or [`Error::ReadOnlyTransaction`]
    pub(crate) fn mutator(&mut self) -> Result<&mut (dyn Mutator + 'a)> {
        match self {
            Access::ReadWrite(writer) => Ok(&mut **writer),
            Access::ReadOnly(_) => Err(Error::ReadOnlyTransaction),
        }
    }
}

impl Retriever for Access<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        match self {
            Access::ReadOnly(reader) => reader.get(key),
            Access::ReadWrite(writer) => writer.get(key),
        }
    }
}

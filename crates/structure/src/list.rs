//! List operations
//!
//! A list is one meta record (see [`crate::meta`]) plus one data record per
//! live index. Pushes write data before widening the window; pops and clear
//! delete data in the same call that narrows the window. A pop that empties
//! the list deletes the meta record, so an empty list leaves no keys behind.
//!
//! | Operation | View | Empty / out of range |
//! |-----------|------|----------------------|
//! | lpush, rpush | read-write | empty input is a no-op |
//! | lpop, rpop | read-write | `Ok(None)` |
//! | lindex | any | `Ok(None)` |
//! | lset | read-write | `Err(ListIndexOutOfRange)` |
//! | llen | any | `Ok(0)` |
//! | lclear | read-write | no-op |
//!
//! Every read-write operation passes the capability gate before it reads
//! anything. A live index whose data record is missing is corruption: pops
//! and `lindex` fail with `CorruptListData` and write nothing.

use crate::meta::{load_list_meta, persist_list_meta, remove_list_meta, ListMeta, Side};
use crate::structure::TxStructure;
use structdb_core::{Error, Mutator, Result, Retriever};
use tracing::{debug, warn};

impl TxStructure<'_> {
    /// Prepend values, one at a time, in the given order
    ///
    /// Each value becomes the new head, so `lpush(k, ["a", "b"])` leaves
    /// `b` first.
    pub fn lpush<V: AsRef<[u8]>>(&mut self, key: &[u8], values: &[V]) -> Result<()> {
        self.list_push(key, Side::Left, values)
    }

    /// Append values in the given order
    pub fn rpush<V: AsRef<[u8]>>(&mut self, key: &[u8], values: &[V]) -> Result<()> {
        self.list_push(key, Side::Right, values)
    }

    /// Remove and return the first element
    pub fn lpop(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.list_pop(key, Side::Left)
    }

    /// Remove and return the last element
    pub fn rpop(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.list_pop(key, Side::Right)
    }

    /// Number of elements, 0 for an absent list
    pub fn llen(&self, key: &[u8]) -> Result<i64> {
        Ok(self.list_meta(key)?.len())
    }

    /// Element at `index`
    ///
    /// `index >= 0` counts from the head, `index < 0` from the tail.
    /// Returns `Ok(None)` when the index is outside the list, including
    /// when the list is absent. A live index with no data record fails
    /// with [`Error::CorruptListData`].
    pub fn lindex(&self, key: &[u8], index: i64) -> Result<Option<Vec<u8>>> {
        let meta = self.list_meta(key)?;
        let Some(absolute) = meta.resolve(index) else {
            return Ok(None);
        };
        let data_key = self.keys.encode_list_data_key(key, absolute);
        load_live_element(&self.access, key, &data_key, absolute).map(Some)
    }

    /// Overwrite the element at `index`
    ///
    /// Same indexing as [`TxStructure::lindex`], but an index outside the
    /// list fails with [`Error::ListIndexOutOfRange`] and writes nothing.
    pub fn lset(&mut self, key: &[u8], index: i64, value: &[u8]) -> Result<()> {
        let writer = self.access.mutator()?;
        let meta_key = self.keys.encode_list_meta_key(key);
        let meta = load_list_meta(&*writer, key, &meta_key)?;

        let absolute = meta
            .resolve(index)
            .ok_or(Error::ListIndexOutOfRange { index })?;
        writer.set(&self.keys.encode_list_data_key(key, absolute), value)
    }

    /// Delete every element and the meta record
    ///
    /// Issues one delete per live index. Clearing an absent list succeeds.
    pub fn lclear(&mut self, key: &[u8]) -> Result<()> {
        let writer = self.access.mutator()?;
        let meta_key = self.keys.encode_list_meta_key(key);
        let meta = load_list_meta(&*writer, key, &meta_key)?;
        if meta.is_empty() {
            return Ok(());
        }

        for index in meta.l_index..meta.r_index {
            writer.delete(&self.keys.encode_list_data_key(key, index))?;
        }
        remove_list_meta(writer, &meta_key)?;

        debug!(key = %key.escape_ascii(), cleared = meta.len(), "list cleared");
        Ok(())
    }

    /// Current window of a list; the empty window if absent
    pub fn list_meta(&self, key: &[u8]) -> Result<ListMeta> {
        let meta_key = self.keys.encode_list_meta_key(key);
        load_list_meta(&self.access, key, &meta_key)
    }

    fn list_push<V: AsRef<[u8]>>(&mut self, key: &[u8], side: Side, values: &[V]) -> Result<()> {
        let writer = self.access.mutator()?;
        if values.is_empty() {
            return Ok(());
        }

        let meta_key = self.keys.encode_list_meta_key(key);
        let meta = load_list_meta(&*writer, key, &meta_key)?;
        let next = meta.pushed(side, values.len())?;

        match side {
            // First value lands at l_index - 1, last at the new l_index
            Side::Left => {
                for (index, value) in (next.l_index..meta.l_index).rev().zip(values) {
                    writer.set(&self.keys.encode_list_data_key(key, index), value.as_ref())?;
                }
            }
            Side::Right => {
                for (index, value) in (meta.r_index..next.r_index).zip(values) {
                    writer.set(&self.keys.encode_list_data_key(key, index), value.as_ref())?;
                }
            }
        }
        persist_list_meta(writer, &meta_key, next)?;

        debug!(
            key = %key.escape_ascii(),
            ?side,
            pushed = values.len(),
            before = %meta,
            after = %next,
            "list push"
        );
        Ok(())
    }

    fn list_pop(&mut self, key: &[u8], side: Side) -> Result<Option<Vec<u8>>> {
        let writer = self.access.mutator()?;
        let meta_key = self.keys.encode_list_meta_key(key);
        let meta = load_list_meta(&*writer, key, &meta_key)?;

        let Some((index, next)) = meta.popped(side) else {
            return Ok(None);
        };

        let data_key = self.keys.encode_list_data_key(key, index);
        let value = load_live_element(&*writer, key, &data_key, index)?;
        writer.delete(&data_key)?;

        if next.is_empty() {
            remove_list_meta(writer, &meta_key)?;
        } else {
            persist_list_meta(writer, &meta_key, next)?;
        }

        debug!(
            key = %key.escape_ascii(),
            ?side,
            index,
            before = %meta,
            after = %next,
            "list pop"
        );
        Ok(Some(value))
    }
}

/// Read the data record at a live index
///
/// The window says the record exists, so a miss is corruption.
fn load_live_element<R>(reader: &R, key: &[u8], data_key: &[u8], index: i64) -> Result<Vec<u8>>
where
    R: Retriever + ?Sized,
{
    match reader.get(data_key)? {
        Some(value) => Ok(value),
        None => {
            warn!(key = %key.escape_ascii(), index, "list data record missing inside window");
            Err(Error::corrupt_list_data(key, index))
        }
    }
}

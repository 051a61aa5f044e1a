//! List meta record
//!
//! A list's meta record is the half-open window `[l_index, r_index)` of
//! absolute indices that currently hold elements. It is the sole authority
//! on which data records are live.
//!
//! ## Wire Format
//!
//! ```text
//! bytes 0..8   l_index, big-endian two's complement
//! bytes 8..16  r_index, big-endian two's complement
//! ```
//!
//! Any other length is corruption and is never coerced.
//!
//! ## Transitions
//!
//! Window changes are pure functions ([`ListMeta::pushed`],
//! [`ListMeta::popped`]) that return the next meta. Callers compute it
//! once, write the data records, then persist it with a single write.

use byteorder::{BigEndian, ByteOrder};
use structdb_core::{Error, Mutator, Result, Retriever};
use tracing::{trace, warn};

/// Encoded size of a [`ListMeta`]
pub const LIST_META_SIZE: usize = 16;

/// End of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Head (lowest index)
    Left,
    /// Tail (highest index)
    Right,
}

/// Live index window of one list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListMeta {
    /// First live index (inclusive)
    pub l_index: i64,
    /// One past the last live index
    pub r_index: i64,
}

impl ListMeta {
    /// The window of an absent list
    pub const EMPTY: ListMeta = ListMeta {
        l_index: 0,
        r_index: 0,
    };

    /// Create a window
    pub const fn new(l_index: i64, r_index: i64) -> Self {
        Self { l_index, r_index }
    }

    /// Check if the window holds no elements
    pub const fn is_empty(&self) -> bool {
        self.l_index >= self.r_index
    }

    /// Number of live elements
    pub fn len(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.r_index.saturating_sub(self.l_index)
        }
    }

    /// Encode to the 16-byte wire format
    pub fn to_bytes(&self) -> [u8; LIST_META_SIZE] {
        let mut buf = [0u8; LIST_META_SIZE];
        BigEndian::write_i64(&mut buf[0..8], self.l_index);
        BigEndian::write_i64(&mut buf[8..16], self.r_index);
        buf
    }

    /// Decode from the wire format, `None` if the length is wrong
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != LIST_META_SIZE {
            return None;
        }
        Some(Self {
            l_index: BigEndian::read_i64(&bytes[0..8]),
            r_index: BigEndian::read_i64(&bytes[8..16]),
        })
    }

    /// Window after pushing `count` elements onto `side`
    ///
    /// Fails with [`Error::ListIndexOverflow`] if either bound or the
    /// resulting length leaves the i64 range.
    pub fn pushed(self, side: Side, count: usize) -> Result<Self> {
        let count = i64::try_from(count).map_err(|_| {
            Error::ListIndexOverflow(format!("push of {} values exceeds i64", count))
        })?;

        let next = match side {
            Side::Left => Self {
                l_index: self.l_index.checked_sub(count).ok_or_else(|| {
                    Error::ListIndexOverflow(format!(
                        "left push of {} below l_index {}",
                        count, self.l_index
                    ))
                })?,
                ..self
            },
            Side::Right => Self {
                r_index: self.r_index.checked_add(count).ok_or_else(|| {
                    Error::ListIndexOverflow(format!(
                        "right push of {} past r_index {}",
                        count, self.r_index
                    ))
                })?,
                ..self
            },
        };

        if next.r_index.checked_sub(next.l_index).is_none() {
            return Err(Error::ListIndexOverflow(format!(
                "list length of window {} exceeds i64",
                next
            )));
        }
        Ok(next)
    }

    /// Vacated index and window after popping one element from `side`
    ///
    /// `None` if the window is empty.
    pub fn popped(self, side: Side) -> Option<(i64, Self)> {
        if self.is_empty() {
            return None;
        }
        Some(match side {
            Side::Left => (
                self.l_index,
                Self {
                    l_index: self.l_index + 1,
                    ..self
                },
            ),
            Side::Right => {
                let index = self.r_index - 1;
                (
                    index,
                    Self {
                        r_index: index,
                        ..self
                    },
                )
            }
        })
    }

    /// Absolute index addressed by a caller index, if it is live
    ///
    /// Non-negative indices count from the head, negative ones from the
    /// tail (`-1` is the last element).
    pub fn resolve(&self, index: i64) -> Option<i64> {
        if self.is_empty() {
            return None;
        }
        let absolute = if index >= 0 {
            self.l_index.checked_add(index)?
        } else {
            self.r_index.checked_add(index)?
        };
        (absolute >= self.l_index && absolute < self.r_index).then_some(absolute)
    }
}

impl std::fmt::Display for ListMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.l_index, self.r_index)
    }
}

// ============================================================================
// Meta persistence
// ============================================================================

/// Load the meta record stored at `meta_key`
///
/// A missing record is the empty list, never an error. `structure_key` is
/// only used to label corruption errors.
pub(crate) fn load_list_meta<R>(
    reader: &R,
    structure_key: &[u8],
    meta_key: &[u8],
) -> Result<ListMeta>
where
    R: Retriever + ?Sized,
{
    let Some(raw) = reader.get(meta_key)? else {
        trace!(key = %structure_key.escape_ascii(), "list meta absent");
        return Ok(ListMeta::EMPTY);
    };

    match ListMeta::from_bytes(&raw) {
        Some(meta) => {
            trace!(key = %structure_key.escape_ascii(), meta = %meta, "list meta loaded");
            Ok(meta)
        }
        None => {
            warn!(
                key = %structure_key.escape_ascii(),
                len = raw.len(),
                "corrupt list meta"
            );
            Err(Error::corrupt_list_meta(structure_key, raw.len()))
        }
    }
}

/// Write `meta` to `meta_key`
pub(crate) fn persist_list_meta<M>(writer: &mut M, meta_key: &[u8], meta: ListMeta) -> Result<()>
where
    M: Mutator + ?Sized,
{
    writer.set(meta_key, &meta.to_bytes())
}

/// Delete the meta record at `meta_key`
pub(crate) fn remove_list_meta<M>(writer: &mut M, meta_key: &[u8]) -> Result<()>
where
    M: Mutator + ?Sized,
{
    writer.delete(meta_key)
}

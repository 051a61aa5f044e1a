//! Key encoding for structure records
//!
//! Every record a structure owns lives under one store key:
//!
//! ```text
//! prefix | encode_bytes(structure_key) | kind tag | [index: 8 bytes]
//! ```
//!
//! - `prefix` comes from [`crate::StructureConfig`] and partitions the
//!   keyspace between independent structure layers.
//! - `encode_bytes` is the memcomparable group encoding: the structure key
//!   is split into 8-byte groups, each followed by a marker byte. It is
//!   self-delimiting, so no structure key is a prefix-collision for
//!   another.
//! - The kind tag separates list meta, list data and every sibling kind.
//! - List data keys append the index with its sign bit flipped, big-endian,
//!   so one list's records sort by index.

use byteorder::{BigEndian, ByteOrder};

const ENC_GROUP_SIZE: usize = 8;
const ENC_MARKER: u8 = 0xFF;
const ENC_PAD: u8 = 0x00;
const SIGN_MASK: u64 = 0x8000_0000_0000_0000;

/// Record kinds that share the structure keyspace
///
/// The set is closed: a new kind gets a new variant and tag here rather
/// than an ad hoc key prefix elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StructureKind {
    /// Scalar string value
    String = b's',
    /// Hash field-count record
    HashMeta = b'S',
    /// Hash field record
    HashData = b'h',
    /// List window record
    ListMeta = b'l',
    /// List element record
    ListData = b'L',
}

impl StructureKind {
    /// All kinds (for iteration)
    pub const ALL: [StructureKind; 5] = [
        StructureKind::String,
        StructureKind::HashMeta,
        StructureKind::HashData,
        StructureKind::ListMeta,
        StructureKind::ListData,
    ];

    /// Tag byte written after the encoded structure key
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Parse a tag byte
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// Builds store keys for structure records under a fixed prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEncoder {
    prefix: Vec<u8>,
}

impl KeyEncoder {
    /// Create an encoder for the given keyspace prefix
    pub fn new(prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Keyspace prefix shared by every key this encoder produces
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Store key of a record with no index component
    pub fn encode(&self, structure_key: &[u8], kind: StructureKind) -> Vec<u8> {
        let groups = structure_key.len() / ENC_GROUP_SIZE + 1;
        let mut buf =
            Vec::with_capacity(self.prefix.len() + groups * (ENC_GROUP_SIZE + 1) + 1 + 8);
        buf.extend_from_slice(&self.prefix);
        encode_bytes(&mut buf, structure_key);
        buf.push(kind.tag());
        buf
    }

    /// Store key of a record addressed by a signed index
    pub fn encode_indexed(
        &self,
        structure_key: &[u8],
        kind: StructureKind,
        index: i64,
    ) -> Vec<u8> {
        let mut buf = self.encode(structure_key, kind);
        let mut raw = [0u8; 8];
        BigEndian::write_u64(&mut raw, encode_index(index));
        buf.extend_from_slice(&raw);
        buf
    }

    /// Store key of a list's meta record
    pub fn encode_list_meta_key(&self, structure_key: &[u8]) -> Vec<u8> {
        self.encode(structure_key, StructureKind::ListMeta)
    }

    /// Store key of the list element at absolute `index`
    pub fn encode_list_data_key(&self, structure_key: &[u8], index: i64) -> Vec<u8> {
        self.encode_indexed(structure_key, StructureKind::ListData, index)
    }
}

/// Memcomparable group encoding of arbitrary bytes
///
/// Each group holds 8 data bytes (zero-padded) followed by
/// `ENC_MARKER - pad_count`. A group with a marker of `ENC_MARKER` is
/// always followed by another group.
fn encode_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    let mut idx = 0;
    loop {
        let remain = data.len() - idx;
        if remain >= ENC_GROUP_SIZE {
            buf.extend_from_slice(&data[idx..idx + ENC_GROUP_SIZE]);
            buf.push(ENC_MARKER);
            idx += ENC_GROUP_SIZE;
        } else {
            let pad = ENC_GROUP_SIZE - remain;
            buf.extend_from_slice(&data[idx..]);
            buf.extend(std::iter::repeat(ENC_PAD).take(pad));
            buf.push(ENC_MARKER - pad as u8);
            return;
        }
    }
}

#[inline]
fn encode_index(index: i64) -> u64 {
    (index as u64) ^ SIGN_MASK
}

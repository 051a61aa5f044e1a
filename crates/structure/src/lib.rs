//! Transactional data structures over a key-value transaction
//!
//! This crate maps richer structures onto the point reads, writes and
//! deletes of a [`structdb_core::Mutator`]:
//! - Lists: double-ended, index-addressable, one record per element
//!
//! A [`TxStructure`] is bound to one caller-held transaction. It keeps no
//! state of its own, so isolation, atomicity and conflict detection are
//! entirely the engine's.
//!
//! ## Key Layout
//!
//! ```text
//! prefix | memcomparable(key) | kind tag | [index, sign-flipped big-endian]
//! ```
//!
//! See [`keys`] for the encoding and [`meta`] for the list meta record.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod access;
pub mod config;
pub mod keys;
pub mod list;
pub mod meta;
pub mod structure;

pub use config::StructureConfig;
pub use keys::{KeyEncoder, StructureKind};
pub use meta::{ListMeta, Side, LIST_META_SIZE};
pub use structure::TxStructure;
pub use structdb_core::{Error, Result};

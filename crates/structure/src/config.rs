//! Structure layer configuration
//!
//! ```toml
//! # every key written by this structure layer starts with "m"
//! prefix = "m"
//!
//! # non-UTF-8 prefixes are written as a byte array
//! # prefix = [255, 0, 109]
//! ```

use crate::keys::KeyEncoder;
use serde::{Deserialize, Serialize};
use structdb_core::{Error, Result};

/// Configuration for a [`crate::TxStructure`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StructureConfig {
    /// Keyspace prefix for every record this layer writes
    ///
    /// Structures with different prefixes never see each other's records.
    /// Empty by default. Any bytes are allowed; TOML holds it as a string
    /// when it is valid UTF-8 and as an array of bytes otherwise.
    #[serde(with = "prefix_repr")]
    pub prefix: Vec<u8>,
}

impl StructureConfig {
    /// Default configuration (empty prefix)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyspace prefix
    pub fn with_prefix(mut self, prefix: impl Into<Vec<u8>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] on malformed TOML, wrong field types, or
    /// unknown fields.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub(crate) fn key_encoder(&self) -> KeyEncoder {
        KeyEncoder::new(self.prefix.clone())
    }
}

mod prefix_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Prefix {
        Text(String),
        Bytes(Vec<u8>),
    }

    pub(super) fn serialize<S>(prefix: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match std::str::from_utf8(prefix) {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => serializer.collect_seq(prefix),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Prefix::deserialize(deserializer)? {
            Prefix::Text(text) => text.into_bytes(),
            Prefix::Bytes(bytes) => bytes,
        })
    }
}

//! Binary encoding of the local crafted-recipe cache.
//!
//! The blob is a `bitcode` encoding of a [`CraftedSnapshot`] whose header
//! carries a magic number and format version, checked before the payload is
//! trusted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Magic number identifying a crafted-recipe blob.
pub const CRAFTED_MAGIC: u32 = 0x7C4A_F701;

/// Current format version. Increment when breaking the layout.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", CRAFTED_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraftedHeader {
    pub magic: u32,
    pub version: u32,
}

impl CraftedHeader {
    pub fn new() -> Self {
        Self {
            magic: CRAFTED_MAGIC,
            version: FORMAT_VERSION,
        }
    }

    pub fn validate(&self) -> Result<(), DeserializeError> {
        if self.magic != CRAFTED_MAGIC {
            return Err(DeserializeError::InvalidMagic(self.magic));
        }
        if self.version != FORMAT_VERSION {
            return Err(DeserializeError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

impl Default for CraftedHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk form of the crafted set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraftedSnapshot {
    pub header: CraftedHeader,
    pub recipe_ids: Vec<String>,
}

pub fn encode_crafted(crafted: &BTreeSet<String>) -> Result<Vec<u8>, SerializeError> {
    let snapshot = CraftedSnapshot {
        header: CraftedHeader::new(),
        recipe_ids: crafted.iter().cloned().collect(),
    };
    bitcode::serialize(&snapshot).map_err(|e| SerializeError::Encode(e.to_string()))
}

pub fn decode_crafted(data: &[u8]) -> Result<BTreeSet<String>, DeserializeError> {
    let snapshot: CraftedSnapshot =
        bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
    snapshot.header.validate()?;
    Ok(snapshot.recipe_ids.into_iter().collect())
}

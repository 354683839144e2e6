//! `StructureId`: a strong handle for catalog structures
//!
//! Atlas ontologies number their structures with small non-negative
//! integers (`997` is conventionally the root). `StructureId` wraps a `u32`
//! so ids cannot be confused with positions, counts or vertex indices.

use std::{fmt, num::ParseIntError, str::FromStr};

/// Numeric identifier of one structure.
///
/// Serialized transparently as the bare integer, so structure lists written
/// by atlas tooling deserialize without adaptation.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct StructureId(u32);

impl StructureId {
    /// Wraps a raw id.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        StructureId(raw)
    }

    /// Returns the raw integer.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for StructureId {
    #[inline]
    fn from(raw: u32) -> Self {
        StructureId(raw)
    }
}

impl FromStr for StructureId {
    type Err = ParseIntError;

    /// Accepts surrounding whitespace, like the atlas tools that emit ids
    /// padded in tables.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(StructureId)
    }
}

impl fmt::Debug for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructureId").field(&self.0).finish()
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

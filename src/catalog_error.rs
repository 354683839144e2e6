//! CatalogError: unified error type for structure-catalog public APIs
//!
//! Construction, lookup, mesh materialization and structure-list parsing all
//! report failures through [`CatalogError`]. Decoders report through the
//! narrower [`MeshDecodeError`], which is carried as the source of
//! [`CatalogError::MeshDecode`].

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::structure::id::StructureId;

/// Unified error type for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An id or acronym appeared twice in the construction input.
    #[error("duplicate structure key in catalog input: {0}")]
    DuplicateKey(DuplicateKey),
    /// Lookup by an acronym that no structure carries.
    #[error("unknown structure acronym `{0}`")]
    UnknownAcronym(String),
    /// Lookup by an id that no structure carries. Holds the id in decimal
    /// form, which may lie outside the [`StructureId`] range (`"-5"`).
    #[error("unknown structure id `{0}`")]
    UnknownId(String),
    /// The mesh for a structure could not be decoded. The structure stays
    /// mesh-unavailable for the lifetime of the catalog.
    #[error("no valid mesh for region: {acronym}")]
    MeshDecode {
        acronym: String,
        #[source]
        source: MeshDecodeError,
    },
    /// The hierarchy builder rejected the structure list.
    #[error("hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),
    /// An internal index no longer agrees with the records it describes.
    #[error("catalog invariant violated: {0}")]
    InvariantViolation(String),
    /// A structure list could not be read or deserialized.
    #[error("invalid structure list: {0}")]
    StructureList(String),
}

/// The key that was repeated in a catalog's construction input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateKey {
    Id(StructureId),
    Acronym(String),
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateKey::Id(id) => write!(f, "id `{id}`"),
            DuplicateKey::Acronym(acronym) => write!(f, "acronym `{acronym}`"),
        }
    }
}

/// Failure reported by a [`MeshDecoder`](crate::mesh::MeshDecoder).
#[derive(Debug, Error)]
pub enum MeshDecodeError {
    /// The mesh file could not be opened or read.
    #[error("cannot read mesh file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The mesh file was read but its content is malformed.
    #[error("malformed mesh `{}` (line {line}): {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    /// The decoder does not understand this kind of file.
    #[error("unsupported mesh format: `{}`", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Structural problems found while building a hierarchy tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// The last entry of a structure's id path is not the structure itself.
    #[error("structure `{id}` has an id path ending in `{last}`")]
    PathMismatch { id: StructureId, last: StructureId },
    /// A structure names a parent that is not part of the input.
    #[error("structure `{id}` refers to missing parent `{parent}`")]
    MissingParent { id: StructureId, parent: StructureId },
    /// The same id appears twice.
    #[error("structure `{0}` appears more than once")]
    DuplicateNode(StructureId),
    /// Parent links form a cycle; expected a forest.
    #[error("cycle detected in structure hierarchy at `{0}`")]
    CycleDetected(StructureId),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::StructureList(err.to_string())
    }
}

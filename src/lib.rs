#![cfg_attr(docsrs, feature(doc_cfg))]
//! # structure-catalog
//!
//! structure-catalog keeps an in-memory catalog of hierarchical anatomical
//! structures (brain regions of an atlas, for instance). Every structure
//! has a numeric id, a short acronym and a display name, and may reference
//! a surface mesh that is expensive to load.
//!
//! ## Features
//! - Dual-key lookup: by [`StructureId`](structure::StructureId) or by acronym,
//!   over a single record store
//! - Lazy, memoized mesh loading: a mesh is decoded on first request, at most
//!   once per structure, and the outcome (mesh or "unavailable") is cached
//! - Pluggable mesh decoders with a built-in Wavefront `.obj` reader
//! - Pluggable hierarchy builders with a built-in builder driven by each
//!   structure's `structure_id_path`
//! - Lookup-table and tree renderings for display
//!
//! ## Threading
//!
//! A built catalog is `Send + Sync`. Its indices never change; each record's
//! mesh slot is a one-shot cell, so concurrent first requests decode once.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: missing mesh sources and failed
//! decodes at `warn`, construction and decode details at `debug`. Install
//! any `log` backend to see them.

pub mod catalog;
pub mod catalog_error;
pub mod debug_invariants;
pub mod hierarchy;
pub mod io;
pub mod mesh;
pub mod structure;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::catalog::{CatalogOptions, LookupRow, LookupTable, StructureCatalog};
    pub use crate::catalog_error::{CatalogError, DuplicateKey, HierarchyError, MeshDecodeError};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::hierarchy::{HierarchyBuilder, IdPathTreeBuilder, StructureTree};
    pub use crate::mesh::{MeshAsset, MeshDecoder, ObjDecoder};
    pub use crate::structure::{
        MeshLookup, MeshState, MeshUnavailable, MissingMeshWarning, RawStructure, StructureId,
        StructureKey, StructureRecord,
    };
}

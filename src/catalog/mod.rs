//! `StructureCatalog`: dual-indexed store of structure records.
//!
//! Records are keyed by [`StructureId`]; a derived acronym index maps every
//! acronym back to its id, so a structure can be looked up by either key
//! without storing it twice. The catalog is built once and is read-only
//! afterwards, apart from each record memoizing its own mesh.
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use structure_catalog::prelude::*;
//!
//! let catalog = StructureCatalog::build(
//!     &[
//!         RawStructure::new(1u32, "CTX", "Cortex").with_mesh("ctx.obj"),
//!         RawStructure::new(2u32, "TH", "Thalamus"),
//!     ],
//!     Arc::new(ObjDecoder),
//! )?;
//! assert_eq!(catalog.lookup("CTX")?.id(), StructureId::new(1));
//! assert!(!catalog.lookup(2u32)?.get_mesh()?.is_available());
//! # Ok::<(), structure_catalog::catalog_error::CatalogError>(())
//! ```

pub mod lookup_table;

pub use lookup_table::{LookupRow, LookupTable};

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog_error::{CatalogError, DuplicateKey};
use crate::debug_invariants::DebugInvariants;
use crate::hierarchy::{HierarchyBuilder, IdPathTreeBuilder, StructureTree};
use crate::mesh::MeshDecoder;
use crate::structure::id::StructureId;
use crate::structure::key::StructureKey;
use crate::structure::raw::RawStructure;
use crate::structure::record::StructureRecord;

/// Construction options for a [`StructureCatalog`].
#[derive(Clone, Debug, Default)]
pub struct CatalogOptions {
    /// Directory that relative mesh sources are resolved against.
    pub mesh_dir: Option<PathBuf>,
}

impl CatalogOptions {
    pub fn with_mesh_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mesh_dir = Some(dir.into());
        self
    }

    fn resolve_mesh(&self, source: Option<&Path>) -> Option<PathBuf> {
        let source = source?;
        match &self.mesh_dir {
            Some(dir) if source.is_relative() => Some(dir.join(source)),
            _ => Some(source.to_path_buf()),
        }
    }
}

/// Catalog of structures with lookup by id or acronym.
///
/// `T` is the hierarchy handle produced by the [`HierarchyBuilder`] used at
/// construction.
pub struct StructureCatalog<T = StructureTree> {
    records: HashMap<StructureId, StructureRecord>,
    acronym_index: HashMap<String, StructureId>,
    hierarchy: T,
    lookup_table: LookupTable,
}

impl StructureCatalog<StructureTree> {
    /// Builds a catalog with the default [`IdPathTreeBuilder`] and default
    /// options.
    pub fn build(
        structures: &[RawStructure],
        decoder: Arc<dyn MeshDecoder>,
    ) -> Result<Self, CatalogError> {
        Self::build_with(
            structures,
            decoder,
            &IdPathTreeBuilder,
            &CatalogOptions::default(),
        )
    }
}

impl<T> StructureCatalog<T> {
    /// Builds a catalog, handing `structures` unmodified to `builder`.
    ///
    /// # Errors
    /// - [`CatalogError::DuplicateKey`] on the first repeated id or acronym;
    ///   nothing is built in that case.
    /// - Whatever `builder` returns.
    pub fn build_with<B>(
        structures: &[RawStructure],
        decoder: Arc<dyn MeshDecoder>,
        builder: &B,
        options: &CatalogOptions,
    ) -> Result<Self, CatalogError>
    where
        B: HierarchyBuilder<Tree = T> + ?Sized,
    {
        let mut records: HashMap<StructureId, StructureRecord> =
            HashMap::with_capacity(structures.len());
        let mut acronym_index: HashMap<String, StructureId> =
            HashMap::with_capacity(structures.len());
        for raw in structures {
            if records.contains_key(&raw.id) {
                return Err(CatalogError::DuplicateKey(DuplicateKey::Id(raw.id)));
            }
            if acronym_index.contains_key(&raw.acronym) {
                return Err(CatalogError::DuplicateKey(DuplicateKey::Acronym(
                    raw.acronym.clone(),
                )));
            }
            let source = options.resolve_mesh(raw.mesh_source.as_deref());
            records.insert(raw.id, StructureRecord::new(raw, source, decoder.clone()));
            acronym_index.insert(raw.acronym.clone(), raw.id);
        }

        let hierarchy = builder.build_tree(structures)?;
        let lookup_table = LookupTable::from_structures(structures);

        let catalog = Self {
            records,
            acronym_index,
            hierarchy,
            lookup_table,
        };
        catalog.debug_assert_invariants();
        log::debug!("built structure catalog with {} structures", catalog.len());
        Ok(catalog)
    }

    /// Resolves a key to an id without touching the records: ids pass
    /// through, acronyms go through the acronym index, and integers outside
    /// the id range are unknown ids.
    pub fn resolve(&self, key: &StructureKey) -> Result<StructureId, CatalogError> {
        match key {
            StructureKey::Id(id) => Ok(*id),
            StructureKey::OutOfRangeId(digits) => Err(CatalogError::UnknownId(digits.clone())),
            StructureKey::Acronym(acronym) => self
                .id_for_acronym(acronym)
                .ok_or_else(|| CatalogError::UnknownAcronym(acronym.clone())),
        }
    }

    /// Looks a structure up by id or acronym.
    ///
    /// Strings that parse as integers are ids (`"997"`), everything else is
    /// an acronym (`"CTX"`).
    pub fn lookup(&self, key: impl Into<StructureKey>) -> Result<&StructureRecord, CatalogError> {
        let key = key.into();
        let id = self.resolve(&key)?;
        match self.records.get(&id) {
            Some(record) => Ok(record),
            None => {
                debug_assert!(
                    matches!(key, StructureKey::Id(_)),
                    "acronym `{key}` indexed to missing id {id}"
                );
                Err(CatalogError::UnknownId(id.to_string()))
            }
        }
    }

    #[inline]
    pub fn get(&self, id: StructureId) -> Option<&StructureRecord> {
        self.records.get(&id)
    }

    #[inline]
    pub fn id_for_acronym(&self, acronym: &str) -> Option<StructureId> {
        self.acronym_index.get(acronym).copied()
    }

    pub fn contains(&self, key: impl Into<StructureKey>) -> bool {
        self.lookup(key).is_ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in input order.
    pub fn iter(&self) -> impl Iterator<Item = &StructureRecord> + '_ {
        self.lookup_table
            .rows()
            .iter()
            .filter_map(|row| self.records.get(&row.id))
    }

    /// Hierarchy handle built at construction; render it with `Display`.
    #[inline]
    pub fn hierarchy(&self) -> &T {
        &self.hierarchy
    }

    /// (id, acronym, name) table in input order; render it with `Display`.
    #[inline]
    pub fn lookup_table(&self) -> &LookupTable {
        &self.lookup_table
    }
}

impl<T> DebugInvariants for StructureCatalog<T> {
    fn validate_invariants(&self) -> Result<(), CatalogError> {
        if self.acronym_index.len() != self.records.len() {
            return Err(CatalogError::InvariantViolation(format!(
                "{} acronyms indexed for {} records",
                self.acronym_index.len(),
                self.records.len()
            )));
        }
        for (acronym, id) in &self.acronym_index {
            match self.records.get(id) {
                Some(record) if record.acronym() == acronym => {}
                Some(record) => {
                    return Err(CatalogError::InvariantViolation(format!(
                        "acronym `{acronym}` indexed to id {id}, which carries `{}`",
                        record.acronym()
                    )));
                }
                None => {
                    return Err(CatalogError::InvariantViolation(format!(
                        "acronym `{acronym}` indexed to missing id {id}"
                    )));
                }
            }
        }
        for (id, record) in &self.records {
            if record.id() != *id {
                return Err(CatalogError::InvariantViolation(format!(
                    "record `{}` stored under id {id}",
                    record.id()
                )));
            }
        }
        if self.lookup_table.len() != self.records.len() {
            return Err(CatalogError::InvariantViolation(format!(
                "lookup table has {} rows for {} records",
                self.lookup_table.len(),
                self.records.len()
            )));
        }
        Ok(())
    }
}

/// One `(id) \t- acronym` line per structure, in input order.
impl<T> fmt::Display for StructureCatalog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in self.iter() {
            writeln!(f, "({}) \t- {}", record.id(), record.acronym())?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for StructureCatalog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureCatalog")
            .field("structures", &self.records.len())
            .field("hierarchy", &self.hierarchy)
            .finish_non_exhaustive()
    }
}

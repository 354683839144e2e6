//! Hierarchy trees over catalog structures.
//!
//! A catalog hands its raw structure list, unmodified, to a
//! [`HierarchyBuilder`] once at construction and keeps whatever tree comes
//! back. The default [`IdPathTreeBuilder`] reads parent links out of each
//! structure's `structure_id_path`.

pub mod tree;

pub use tree::{IdPathTreeBuilder, StructureTree};

use crate::catalog_error::CatalogError;
use crate::structure::raw::RawStructure;

/// Builds a hierarchy tree from a flat structure list.
pub trait HierarchyBuilder {
    /// Tree handle stored by the catalog.
    type Tree;

    fn build_tree(&self, structures: &[RawStructure]) -> Result<Self::Tree, CatalogError>;
}

impl<B: HierarchyBuilder + ?Sized> HierarchyBuilder for &B {
    type Tree = B::Tree;

    #[inline]
    fn build_tree(&self, structures: &[RawStructure]) -> Result<Self::Tree, CatalogError> {
        (**self).build_tree(structures)
    }
}

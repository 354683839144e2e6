//! Construction input for a [`StructureCatalog`](crate::catalog::StructureCatalog).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::structure::id::StructureId;

/// One structure as supplied by the caller, before it enters a catalog.
///
/// Atlas metadata files name the mesh field `mesh_filename`; it is accepted
/// in place of `mesh_source`. An object may carry both only if they agree
/// (or one of them is `null`). Every other field of the object (colors,
/// graph ids, ...) is kept verbatim in [`extra`](Self::extra).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStructureRepr")]
pub struct RawStructure {
    pub id: StructureId,
    pub acronym: String,
    pub name: String,
    /// Location of the mesh file, or `None` when the structure has no mesh.
    #[serde(default)]
    pub mesh_source: Option<PathBuf>,
    /// Ids from the ontology root down to this structure, inclusive.
    #[serde(default)]
    pub structure_id_path: Vec<StructureId>,
    /// Remaining metadata fields, keyed by their name in the input.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire form: both mesh field spellings are read, then reconciled.
#[derive(Deserialize)]
struct RawStructureRepr {
    id: StructureId,
    acronym: String,
    name: String,
    #[serde(default)]
    mesh_source: Option<PathBuf>,
    #[serde(default)]
    mesh_filename: Option<PathBuf>,
    #[serde(default)]
    structure_id_path: Vec<StructureId>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawStructureRepr> for RawStructure {
    type Error = String;

    fn try_from(repr: RawStructureRepr) -> Result<Self, Self::Error> {
        let mesh_source = match (repr.mesh_source, repr.mesh_filename) {
            (Some(source), Some(filename)) if source != filename => {
                return Err(format!(
                    "structure {}: conflicting mesh_source `{}` and mesh_filename `{}`",
                    repr.id,
                    source.display(),
                    filename.display()
                ));
            }
            (source, filename) => source.or(filename),
        };
        Ok(Self {
            id: repr.id,
            acronym: repr.acronym,
            name: repr.name,
            mesh_source,
            structure_id_path: repr.structure_id_path,
            extra: repr.extra,
        })
    }
}

impl RawStructure {
    /// A structure without mesh and without ancestry.
    pub fn new(id: impl Into<StructureId>, acronym: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            acronym: acronym.into(),
            name: name.into(),
            mesh_source: None,
            structure_id_path: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Sets the mesh location.
    pub fn with_mesh(mut self, source: impl Into<PathBuf>) -> Self {
        self.mesh_source = Some(source.into());
        self
    }

    /// Sets the root-to-self id path.
    pub fn with_id_path<I, T>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StructureId>,
    {
        self.structure_id_path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one metadata field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

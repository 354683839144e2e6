//! `StructureRecord`: structure metadata with a lazily materialized mesh.
//!
//! The mesh slot is a one-shot cell. It starts empty ("unloaded") for every
//! record, whether or not a mesh source is configured, and is filled exactly
//! once on the first call to [`StructureRecord::get_mesh`]:
//!
//! ```text
//! Unloaded ──► Loaded(MeshAsset)
//!          └─► Unavailable(MissingSource | DecodeFailed)
//! ```
//!
//! The cell is `once_cell::sync::OnceCell`, so concurrent first accessors
//! run the decoder once and the rest wait for its outcome.

use once_cell::sync::OnceCell;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog_error::{CatalogError, MeshDecodeError};
use crate::mesh::{MeshAsset, MeshDecoder};
use crate::structure::id::StructureId;
use crate::structure::raw::RawStructure;

/// Settled mesh state of a record.
#[derive(Debug)]
pub enum MeshState {
    Loaded(MeshAsset),
    Unavailable(MeshUnavailable),
}

/// Why a record has no mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshUnavailable {
    /// No mesh source was configured for the structure.
    MissingSource(MissingMeshWarning),
    /// The one decode attempt failed; the error was returned to the caller
    /// that triggered it.
    DecodeFailed,
}

/// Non-fatal notice that a structure has no mesh source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMeshWarning {
    pub acronym: String,
}

impl fmt::Display for MissingMeshWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No mesh filename for region {}", self.acronym)
    }
}

/// Result of a successful [`StructureRecord::get_mesh`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshLookup<'a> {
    Loaded(&'a MeshAsset),
    Unavailable(&'a MeshUnavailable),
}

impl<'a> MeshLookup<'a> {
    /// The mesh, if one was loaded.
    #[inline]
    pub fn asset(self) -> Option<&'a MeshAsset> {
        match self {
            MeshLookup::Loaded(asset) => Some(asset),
            MeshLookup::Unavailable(_) => None,
        }
    }

    #[inline]
    pub fn is_available(self) -> bool {
        matches!(self, MeshLookup::Loaded(_))
    }

    /// The missing-source warning, if that is why the mesh is unavailable.
    pub fn warning(self) -> Option<&'a MissingMeshWarning> {
        match self {
            MeshLookup::Unavailable(MeshUnavailable::MissingSource(w)) => Some(w),
            _ => None,
        }
    }
}

impl<'a> From<&'a MeshState> for MeshLookup<'a> {
    fn from(state: &'a MeshState) -> Self {
        match state {
            MeshState::Loaded(asset) => MeshLookup::Loaded(asset),
            MeshState::Unavailable(reason) => MeshLookup::Unavailable(reason),
        }
    }
}

/// One structure of a catalog.
pub struct StructureRecord {
    id: StructureId,
    acronym: String,
    name: String,
    mesh_source: Option<PathBuf>,
    structure_id_path: Vec<StructureId>,
    metadata: Map<String, Value>,
    mesh: OnceCell<MeshState>,
    decoder: Arc<dyn MeshDecoder>,
}

impl StructureRecord {
    /// Creates an unloaded record. `mesh_source` overrides the raw source,
    /// letting the catalog resolve relative paths.
    pub(crate) fn new(
        raw: &RawStructure,
        mesh_source: Option<PathBuf>,
        decoder: Arc<dyn MeshDecoder>,
    ) -> Self {
        Self {
            id: raw.id,
            acronym: raw.acronym.clone(),
            name: raw.name.clone(),
            mesh_source,
            structure_id_path: raw.structure_id_path.clone(),
            metadata: raw.extra.clone(),
            mesh: OnceCell::new(),
            decoder,
        }
    }

    #[inline]
    pub fn id(&self) -> StructureId {
        self.id
    }

    #[inline]
    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn mesh_source(&self) -> Option<&Path> {
        self.mesh_source.as_deref()
    }

    #[inline]
    pub fn structure_id_path(&self) -> &[StructureId] {
        &self.structure_id_path
    }

    /// Input fields the catalog does not interpret (`rgb_triplet`, ...).
    #[inline]
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// One metadata field by name.
    #[inline]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Current mesh state; `None` while still unloaded.
    #[inline]
    pub fn mesh_state(&self) -> Option<&MeshState> {
        self.mesh.get()
    }

    #[inline]
    pub fn is_mesh_loaded(&self) -> bool {
        matches!(self.mesh.get(), Some(MeshState::Loaded(_)))
    }

    /// Returns the structure's mesh, loading it on first use.
    ///
    /// The outcome of the first call is memoized: later calls never touch
    /// the decoder again. A missing mesh source yields
    /// [`MeshLookup::Unavailable`] with a [`MissingMeshWarning`]; a decode
    /// failure is returned once as [`CatalogError::MeshDecode`], after which
    /// the record reports [`MeshUnavailable::DecodeFailed`].
    pub fn get_mesh(&self) -> Result<MeshLookup<'_>, CatalogError> {
        let mut failure: Option<MeshDecodeError> = None;
        let state = self.mesh.get_or_init(|| match self.materialize() {
            Ok(state) => state,
            Err(err) => {
                failure = Some(err);
                MeshState::Unavailable(MeshUnavailable::DecodeFailed)
            }
        });
        match failure {
            Some(source) => Err(CatalogError::MeshDecode {
                acronym: self.acronym.clone(),
                source,
            }),
            None => Ok(MeshLookup::from(state)),
        }
    }

    fn materialize(&self) -> Result<MeshState, MeshDecodeError> {
        let Some(source) = self.mesh_source.as_deref() else {
            let warning = MissingMeshWarning {
                acronym: self.acronym.clone(),
            };
            log::warn!("{warning}");
            return Ok(MeshState::Unavailable(MeshUnavailable::MissingSource(
                warning,
            )));
        };
        log::debug!("loading mesh for {} from {}", self.acronym, source.display());
        match self.decoder.decode(source) {
            Ok(asset) => Ok(MeshState::Loaded(asset)),
            Err(err) => {
                log::warn!("no valid mesh for region {}: {err}", self.acronym);
                Err(err)
            }
        }
    }
}

impl fmt::Debug for StructureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureRecord")
            .field("id", &self.id)
            .field("acronym", &self.acronym)
            .field("name", &self.name)
            .field("mesh_source", &self.mesh_source)
            .field("mesh", &self.mesh.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingDecoder {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MeshDecoder for CountingDecoder {
        fn decode(&self, path: &Path) -> Result<MeshAsset, MeshDecodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(MeshDecodeError::Parse {
                    path: path.to_path_buf(),
                    line: 1,
                    message: "garbage".into(),
                });
            }
            Ok(MeshAsset {
                vertices: vec![[0.0, 0.0, 0.0]],
                ..MeshAsset::default()
            })
        }
    }

    fn record(raw: RawStructure, decoder: &Arc<CountingDecoder>) -> StructureRecord {
        let source = raw.mesh_source.clone();
        StructureRecord::new(&raw, source, decoder.clone())
    }

    #[test]
    fn starts_unloaded_even_with_a_source() {
        let decoder = Arc::new(CountingDecoder::default());
        let rec = record(RawStructure::new(1u32, "CTX", "Cortex").with_mesh("ctx.obj"), &decoder);
        assert!(rec.mesh_state().is_none());
        assert!(!rec.is_mesh_loaded());
        assert_eq!(decoder.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_source_settles_unavailable_with_warning() {
        let decoder = Arc::new(CountingDecoder::default());
        let rec = record(RawStructure::new(2u32, "TH", "Thalamus"), &decoder);
        let lookup = rec.get_mesh().unwrap();
        assert!(!lookup.is_available());
        assert_eq!(lookup.warning().map(|w| w.acronym.as_str()), Some("TH"));
        assert!(matches!(
            rec.mesh_state(),
            Some(MeshState::Unavailable(MeshUnavailable::MissingSource(_)))
        ));
        assert_eq!(decoder.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failed_decode_is_reported_once() {
        let decoder = Arc::new(CountingDecoder {
            fail: true,
            ..CountingDecoder::default()
        });
        let rec = record(RawStructure::new(3u32, "BAD", "Broken").with_mesh("bad.obj"), &decoder);
        let err = rec.get_mesh().unwrap_err();
        assert!(matches!(err, CatalogError::MeshDecode { ref acronym, .. } if acronym == "BAD"));
        let again = rec.get_mesh().unwrap();
        assert_eq!(again, MeshLookup::Unavailable(&MeshUnavailable::DecodeFailed));
        assert_eq!(decoder.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn metadata_is_carried_from_input() {
        let decoder = Arc::new(CountingDecoder::default());
        let rec = record(
            RawStructure::new(8u32, "grey", "Basic cell groups")
                .with_extra("rgb_triplet", vec![191, 218, 227]),
            &decoder,
        );
        assert_eq!(
            rec.field("rgb_triplet"),
            Some(&serde_json::json!([191, 218, 227]))
        );
        assert_eq!(rec.metadata().len(), 1);
        assert_eq!(rec.field("graph_order"), None);
    }

    #[test]
    fn missing_mesh_warning_message() {
        let w = MissingMeshWarning {
            acronym: "VS".into(),
        };
        assert_eq!(w.to_string(), "No mesh filename for region VS");
    }
}

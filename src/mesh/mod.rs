//! Mesh assets and the decoders that load them.
//!
//! A structure's mesh is loaded through a [`MeshDecoder`], shared by every
//! record of a catalog. [`ObjDecoder`] handles Wavefront `.obj` files, the
//! format atlas meshes are distributed in; callers with other formats plug
//! in their own implementation.

pub mod obj;

pub use obj::ObjDecoder;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;

use crate::catalog_error::MeshDecodeError;

/// Decoded surface mesh of one structure.
///
/// Faces are polygons given as zero-based indices into `vertices`.
/// Geometry is not validated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshAsset {
    pub vertices: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub faces: Vec<Vec<usize>>,
}

impl MeshAsset {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// `true` if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let (first, rest) = self.vertices.split_first()?;
        let mut lo = *first;
        let mut hi = *first;
        for v in rest {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(v[axis]);
                hi[axis] = hi[axis].max(v[axis]);
            }
        }
        Some((lo, hi))
    }
}

/// Loads a [`MeshAsset`] from a location.
///
/// Decoding may block on I/O. A catalog calls a decoder at most once per
/// structure, possibly from several threads, hence the `Send + Sync` bound.
pub trait MeshDecoder: Send + Sync + Debug {
    fn decode(&self, path: &Path) -> Result<MeshAsset, MeshDecodeError>;
}

impl<D: MeshDecoder + ?Sized> MeshDecoder for Box<D> {
    #[inline]
    fn decode(&self, path: &Path) -> Result<MeshAsset, MeshDecodeError> {
        (**self).decode(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_empty_mesh() {
        assert_eq!(MeshAsset::default().bounds(), None);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mesh = MeshAsset {
            vertices: vec![[0.0, 2.0, -1.0], [3.0, -4.0, 5.0], [1.0, 1.0, 1.0]],
            ..MeshAsset::default()
        };
        assert_eq!(mesh.bounds(), Some(([0.0, -4.0, -1.0], [3.0, 2.0, 5.0])));
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 0);
        assert!(!mesh.is_empty());
    }
}

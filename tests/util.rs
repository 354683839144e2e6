#![allow(dead_code)]
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use structure_catalog::prelude::*;

pub fn sid(raw: u32) -> StructureId {
    StructureId::new(raw)
}

/// Decoder that counts calls and fails for paths containing `bad`.
#[derive(Debug, Default)]
pub struct CountingDecoder {
    calls: AtomicUsize,
}

impl CountingDecoder {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Mesh returned for every good path: one triangle tagged by path length.
    pub fn mesh_for(path: &Path) -> MeshAsset {
        let tag = path.as_os_str().len() as f64;
        MeshAsset {
            vertices: vec![[0.0, 0.0, 0.0], [tag, 0.0, 0.0], [0.0, tag, 0.0]],
            normals: Vec::new(),
            faces: vec![vec![0, 1, 2]],
        }
    }
}

impl MeshDecoder for CountingDecoder {
    fn decode(&self, path: &Path) -> Result<MeshAsset, MeshDecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if path.to_string_lossy().contains("bad") {
            return Err(MeshDecodeError::Parse {
                path: path.to_path_buf(),
                line: 1,
                message: "not a mesh".into(),
            });
        }
        Ok(Self::mesh_for(path))
    }
}

/// `CTX` with a mesh, `TH` without one.
pub fn cortex_thalamus() -> Vec<RawStructure> {
    vec![
        RawStructure::new(1u32, "CTX", "Cortex").with_mesh("ctx.obj"),
        RawStructure::new(2u32, "TH", "Thalamus"),
    ]
}

/// Small ontology rooted at 997.
pub fn ontology() -> Vec<RawStructure> {
    vec![
        RawStructure::new(997u32, "root", "root").with_id_path([997u32]),
        RawStructure::new(8u32, "grey", "Basic cell groups and regions")
            .with_id_path([997u32, 8])
            .with_mesh("8.obj"),
        RawStructure::new(688u32, "CTX", "Cerebral cortex")
            .with_id_path([997u32, 8, 688])
            .with_mesh("688.obj"),
        RawStructure::new(549u32, "TH", "Thalamus")
            .with_id_path([997u32, 8, 549])
            .with_mesh("549.obj"),
        RawStructure::new(1009u32, "fiber tracts", "fiber tracts").with_id_path([997u32, 1009]),
    ]
}

/// Unique scratch file under the system temp dir.
pub fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("structure-catalog-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write scratch file");
    path
}

//! Structure-list readers.
//!
//! Atlas packages ship their ontology as a JSON array of structure objects.
//! Fields beyond those of [`RawStructure`] (colors, graph ids, ...) land in
//! [`RawStructure::extra`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::catalog_error::CatalogError;
use crate::structure::raw::RawStructure;

/// Parse a JSON array of structures from a reader.
pub fn read_structures_json<R: Read>(reader: R) -> Result<Vec<RawStructure>, CatalogError> {
    let structures: Vec<RawStructure> = serde_json::from_reader(reader)?;
    log::debug!("read {} structures", structures.len());
    Ok(structures)
}

/// Parse a JSON array of structures from a file.
pub fn load_structures_json(path: impl AsRef<Path>) -> Result<Vec<RawStructure>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        CatalogError::StructureList(format!("cannot open `{}`: {e}", path.display()))
    })?;
    read_structures_json(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::id::StructureId;
    use std::path::PathBuf;

    const STRUCTURES: &str = r#"[
        {
            "acronym": "root",
            "id": 997,
            "name": "root",
            "structure_id_path": [997],
            "rgb_triplet": [255, 255, 255],
            "mesh_filename": "meshes/997.obj"
        },
        {
            "acronym": "TH",
            "id": 549,
            "name": "Thalamus",
            "structure_id_path": [997, 549],
            "mesh_filename": null
        },
        {
            "acronym": "CTX",
            "id": 688,
            "name": "Cerebral cortex",
            "mesh_source": "meshes/688.obj"
        }
    ]"#;

    #[test]
    fn reads_atlas_style_structures() {
        let structures = read_structures_json(STRUCTURES.as_bytes()).unwrap();
        assert_eq!(structures.len(), 3);
        assert_eq!(structures[0].id, StructureId::new(997));
        assert_eq!(structures[0].mesh_source, Some(PathBuf::from("meshes/997.obj")));
        assert_eq!(structures[1].mesh_source, None);
        assert_eq!(
            structures[1].structure_id_path,
            vec![StructureId::new(997), StructureId::new(549)]
        );
        assert_eq!(structures[2].mesh_source, Some(PathBuf::from("meshes/688.obj")));
        assert!(structures[2].structure_id_path.is_empty());
        assert_eq!(
            structures[0].extra.get("rgb_triplet"),
            Some(&serde_json::json!([255, 255, 255]))
        );
        assert!(structures[1].extra.is_empty());
    }

    #[test]
    fn conflicting_mesh_fields_are_a_structure_list_error() {
        let json = r#"[{
            "id": 1, "acronym": "A", "name": "a",
            "mesh_source": "a.obj", "mesh_filename": "b.obj"
        }]"#;
        let err = read_structures_json(json.as_bytes()).unwrap_err();
        assert!(
            matches!(err, CatalogError::StructureList(ref msg) if msg.contains("conflicting")),
            "{err:?}"
        );
    }

    #[test]
    fn malformed_json_is_a_structure_list_error() {
        let err = read_structures_json(r#"[{"id": "x"}]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::StructureList(_)));
    }

    #[test]
    fn missing_file_is_a_structure_list_error() {
        let err = load_structures_json("/nonexistent/structures.json").unwrap_err();
        assert!(matches!(err, CatalogError::StructureList(_)));
    }
}

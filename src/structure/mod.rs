//! Structures: ids, raw input records, lookup keys and catalog records.

pub mod id;
pub mod key;
pub mod raw;
pub mod record;

pub use id::StructureId;
pub use key::StructureKey;
pub use raw::RawStructure;
pub use record::{MeshLookup, MeshState, MeshUnavailable, MissingMeshWarning, StructureRecord};

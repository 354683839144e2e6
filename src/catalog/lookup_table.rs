//! Tabular (id, acronym, name) projection of a catalog, in input order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::structure::id::StructureId;
use crate::structure::raw::RawStructure;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRow {
    pub id: StructureId,
    pub acronym: String,
    pub name: String,
}

/// Rows in the order the structures were supplied to the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTable {
    rows: Vec<LookupRow>,
}

impl LookupTable {
    pub fn from_structures(structures: &[RawStructure]) -> Self {
        let rows = structures
            .iter()
            .map(|s| LookupRow {
                id: s.id,
                acronym: s.acronym.clone(),
                name: s.name.clone(),
            })
            .collect();
        Self { rows }
    }

    #[inline]
    pub fn rows(&self) -> &[LookupRow] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Aligned columns headed `acronym`, `id`, `name`, preceded by a positional
/// index. Ids are right-aligned, text left-aligned.
impl fmt::Display for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_w = self.rows.len().saturating_sub(1).to_string().len();
        let acronym_w = self
            .rows
            .iter()
            .map(|r| r.acronym.chars().count())
            .chain(["acronym".len()])
            .max()
            .unwrap_or_default();
        let id_w = self
            .rows
            .iter()
            .map(|r| r.id.to_string().len())
            .chain(["id".len()])
            .max()
            .unwrap_or_default();

        writeln!(f, "{:index_w$}  {:<acronym_w$}  {:>id_w$}  name", "", "acronym", "id")?;
        for (i, row) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "{i:>index_w$}  {:<acronym_w$}  {:>id_w$}  {}",
                row.acronym,
                row.id.to_string(),
                row.name
            )?;
        }
        Ok(())
    }
}

//! `StructureTree`: parent/child relations between structures, keyed by id.
//!
//! Children keep the order in which structures appeared in the input, and
//! so do roots. Rendering through `Display` draws the forest with
//! box-drawing connectors and acronyms as labels:
//!
//! ```text
//! root
//! ├── grey
//! │   ├── CH
//! │   └── BS
//! └── fiber tracts
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::catalog_error::{CatalogError, HierarchyError};
use crate::hierarchy::HierarchyBuilder;
use crate::structure::id::StructureId;
use crate::structure::raw::RawStructure;

#[derive(Clone, Debug)]
struct TreeNode {
    acronym: String,
    parent: Option<StructureId>,
    children: Vec<StructureId>,
}

/// Forest of structures.
#[derive(Clone, Debug, Default)]
pub struct StructureTree {
    nodes: HashMap<StructureId, TreeNode>,
    roots: Vec<StructureId>,
}

impl StructureTree {
    /// Structures without a parent, in input order.
    #[inline]
    pub fn roots(&self) -> &[StructureId] {
        &self.roots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: StructureId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn acronym(&self, id: StructureId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.acronym.as_str())
    }

    pub fn parent(&self, id: StructureId) -> Option<StructureId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Direct children of `id`; empty for leaves and unknown ids.
    pub fn children(&self, id: StructureId) -> &[StructureId] {
        match self.nodes.get(&id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: StructureId) -> Vec<StructureId> {
        let mut out = Vec::new();
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            out.push(p);
            cur = self.parent(p);
        }
        out
    }

    /// Descendants of `id` in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: StructureId) -> Vec<StructureId> {
        let mut out = Vec::new();
        let mut stack: Vec<StructureId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Number of edges between `id` and its root; `None` for unknown ids.
    pub fn depth(&self, id: StructureId) -> Option<usize> {
        self.contains(id).then(|| self.ancestors(id).len())
    }

    fn label(&self, id: StructureId) -> &str {
        self.acronym(id).unwrap_or_default()
    }

    fn fmt_children(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: StructureId,
        prefix: &mut String,
    ) -> fmt::Result {
        let children = self.children(id);
        for (i, &child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let connector = if last { "└── " } else { "├── " };
            writeln!(f, "{prefix}{connector}{}", self.label(child))?;
            let keep = prefix.len();
            prefix.push_str(if last { "    " } else { "│   " });
            self.fmt_children(f, child, prefix)?;
            prefix.truncate(keep);
        }
        Ok(())
    }
}

impl fmt::Display for StructureTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefix = String::new();
        for &root in &self.roots {
            writeln!(f, "{}", self.label(root))?;
            self.fmt_children(f, root, &mut prefix)?;
        }
        Ok(())
    }
}

/// Builds a [`StructureTree`] from `structure_id_path` ancestry.
///
/// The parent of a structure is the second-to-last entry of its path. An
/// empty or single-entry path makes the structure a root.
#[derive(Debug, Default, Clone)]
pub struct IdPathTreeBuilder;

impl IdPathTreeBuilder {
    fn parent_of(raw: &RawStructure) -> Result<Option<StructureId>, HierarchyError> {
        match raw.structure_id_path.as_slice() {
            [] => Ok(None),
            [.., last] if *last != raw.id => Err(HierarchyError::PathMismatch {
                id: raw.id,
                last: *last,
            }),
            [_] => Ok(None),
            [.., parent, _] => Ok(Some(*parent)),
        }
    }
}

impl HierarchyBuilder for IdPathTreeBuilder {
    type Tree = StructureTree;

    fn build_tree(&self, structures: &[RawStructure]) -> Result<StructureTree, CatalogError> {
        let mut tree = StructureTree::default();
        let mut order = Vec::with_capacity(structures.len());

        for raw in structures {
            let parent = Self::parent_of(raw)?;
            let node = TreeNode {
                acronym: raw.acronym.clone(),
                parent,
                children: Vec::new(),
            };
            if tree.nodes.insert(raw.id, node).is_some() {
                return Err(HierarchyError::DuplicateNode(raw.id).into());
            }
            order.push((raw.id, parent));
        }

        for &(id, parent) in &order {
            match parent {
                None => tree.roots.push(id),
                Some(parent) => match tree.nodes.get_mut(&parent) {
                    Some(node) => node.children.push(id),
                    None => return Err(HierarchyError::MissingParent { id, parent }.into()),
                },
            }
        }

        // Anything not reachable from a root sits on a parent cycle.
        let mut reached: HashSet<StructureId> = HashSet::with_capacity(order.len());
        for &root in &tree.roots {
            reached.insert(root);
            reached.extend(tree.descendants(root));
        }
        if let Some(&(id, _)) = order.iter().find(|(id, _)| !reached.contains(id)) {
            return Err(HierarchyError::CycleDetected(id).into());
        }

        log::debug!(
            "built structure hierarchy: {} nodes, {} roots",
            tree.len(),
            tree.roots.len()
        );
        Ok(tree)
    }
}

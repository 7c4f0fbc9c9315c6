//! Flat index to tree hierarchy
//!
//! Every staged path contributes one tree per ancestor directory (the work-tree
//! root is the empty prefix `""`). Trees are sealed bottom-up: deeper
//! directories first, the root last, so a parent always embeds the final hash
//! of each child.

use crate::areas::index::Index;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::{Result, TwigError};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Root tree and every directory tree, keyed by directory path
#[derive(Debug, Clone)]
pub struct TreeHierarchy {
    trees: BTreeMap<String, Tree>,
}

impl TreeHierarchy {
    pub fn root(&self) -> &Tree {
        &self.trees[""]
    }

    pub fn get(&self, dir: &str) -> Option<&Tree> {
        self.trees.get(dir)
    }

    /// All trees, the root under `""`
    pub fn trees(&self) -> impl Iterator<Item = (&str, &Tree)> {
        self.trees.iter().map(|(dir, tree)| (dir.as_str(), tree))
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

pub struct TreeBuilder;

impl TreeBuilder {
    /// Build and seal the trees describing the staged paths
    ///
    /// An empty index yields just the empty root tree. A path staged both as a
    /// file and as a directory is rejected as a corrupt index.
    pub fn build(index: &Index) -> Result<TreeHierarchy> {
        let mut trees = BTreeMap::<String, Tree>::new();
        trees.insert(String::new(), Tree::default());

        for entry in index.entries() {
            let mut prefix = entry.parent_dir();
            loop {
                trees.entry(prefix.to_string()).or_default();
                match prefix.rsplit_once('/') {
                    Some((parent, _)) => prefix = parent,
                    None if prefix.is_empty() => break,
                    None => prefix = "",
                }
            }

            if let Some(tree) = trees.get_mut(entry.parent_dir()) {
                tree.add_entry(TreeEntry::new(
                    entry.basename().to_string(),
                    entry.mode(),
                    entry.oid,
                ));
            }
        }

        if let Some(entry) = index.entries().find(|entry| trees.contains_key(&entry.path)) {
            return Err(TwigError::CorruptIndex(format!(
                "{} is staged both as a file and as a directory",
                entry.path
            )));
        }

        let mut dirs = trees.keys().cloned().collect::<Vec<_>>();
        dirs.sort_by(|a, b| Self::seal_order(a, b));

        for dir in dirs {
            let Some(tree) = trees.get_mut(&dir) else {
                continue;
            };
            let oid = tree.seal()?;
            tracing::debug!(dir = %dir, %oid, entries = tree.len(), "sealed tree");

            if dir.is_empty() {
                continue;
            }

            let (parent, name) = dir.rsplit_once('/').unwrap_or(("", dir.as_str()));
            if let Some(parent_tree) = trees.get_mut(parent) {
                parent_tree.add_entry(TreeEntry::new(name.to_string(), EntryMode::Directory, oid));
            }
        }

        Ok(TreeHierarchy { trees })
    }

    /// Deeper directories first; at equal depth the root goes last and the
    /// rest ascend by name
    fn seal_order(a: &str, b: &str) -> Ordering {
        let depth = |dir: &str| dir.matches('/').count();

        depth(b)
            .cmp(&depth(a))
            .then_with(|| a.is_empty().cmp(&b.is_empty()))
            .then_with(|| a.cmp(b))
    }
}

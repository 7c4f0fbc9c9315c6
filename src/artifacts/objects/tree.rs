//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<octal-mode> <name>\0<20-byte-sha1>`, with no separator between
//! entries.
//!
//! ## Ordering
//!
//! Entries are emitted in ascending byte order of their names, re-sorted on
//! every serialization regardless of insertion order. The tree hash depends on
//! it.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, TwigError};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub name: String,
    pub mode: EntryMode,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn object_type(&self) -> ObjectType {
        match self.mode {
            EntryMode::Directory => ObjectType::Tree,
            EntryMode::File(_) => ObjectType::Blob,
        }
    }
}

/// Tree object representing a directory snapshot
///
/// `oid` is filled in once the tree has been sealed by the tree builder or
/// when it was loaded from the database under a known ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
    oid: Option<ObjectId>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Tree { entries, oid: None }
    }

    pub fn add_entry(&mut self, entry: TreeEntry) {
        self.entries.push(entry);
    }

    /// Entries in insertion (or on-disk) order
    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in serialization order
    pub fn sorted_entries(&self) -> Vec<&TreeEntry> {
        let mut entries = self.entries.iter().collect::<Vec<_>>();
        entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        entries
    }

    /// Hash the tree as it stands and remember the result
    pub fn seal(&mut self) -> Result<ObjectId> {
        let oid = self.object_id()?;
        self.oid = Some(oid);
        Ok(oid)
    }

    pub fn oid(&self) -> Option<ObjectId> {
        self.oid
    }

    pub(crate) fn with_oid(mut self, oid: ObjectId) -> Self {
        self.oid = Some(oid);
        self
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = Vec::new();

        for entry in self.sorted_entries() {
            let header = format!("{:o} {}\0", entry.mode.as_u32(), entry.name);
            content.extend_from_slice(header.as_bytes());
            content.extend_from_slice(entry.oid.as_bytes());
        }

        Ok(self.object_type().envelope(&content))
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut entries = Vec::new();
        let mut header = Vec::new();

        loop {
            let at_end = reader
                .fill_buf()
                .map_err(|e| TwigError::MalformedTreeEntry(e.to_string()))?
                .is_empty();
            if at_end {
                break;
            }

            // Read "<mode> <name>\0"
            header.clear();
            reader
                .read_until(b'\0', &mut header)
                .map_err(|e| TwigError::MalformedTreeEntry(e.to_string()))?;
            if header.pop() != Some(b'\0') {
                return Err(TwigError::MalformedTreeEntry(
                    "missing NUL after entry name".to_string(),
                ));
            }

            let header = std::str::from_utf8(&header).map_err(|_| {
                TwigError::MalformedTreeEntry("entry header is not UTF-8".to_string())
            })?;
            let (mode, name) = header.split_once(' ').ok_or_else(|| {
                TwigError::MalformedTreeEntry(format!("invalid mode/name: {header}"))
            })?;
            let mode = EntryMode::from_octal_str(mode).ok_or_else(|| {
                TwigError::MalformedTreeEntry(format!("unsupported mode {mode} for {name}"))
            })?;

            let oid = ObjectId::read_h40_from(&mut reader).map_err(|_| {
                TwigError::MalformedTreeEntry(format!("insufficient bytes for hash of {name}"))
            })?;

            entries.push(TreeEntry::new(name.to_string(), mode, oid));
        }

        Ok(Tree::new(entries))
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.sorted_entries()
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.object_type(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

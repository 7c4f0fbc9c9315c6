//! Staging area
//!
//! The index tracks which files go into the next commit, along with their
//! mode, size, modification time and blob hash.
//!
//! ## Index File Format
//!
//! - Header: signature, version and entry count
//! - Entries: staged files in insertion order, without padding
//!
//! ## Data Structures
//!
//! Entries live in a `Vec` so their order survives load/save round trips; the
//! path is the unique key. Adding a path that is already staged replaces the
//! entry where it stands.
//!
//! The index is loaded fresh for every operation and rewritten whole on save.
//! There is no locking: concurrent writers race and the last one wins.

use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::index::index_entry::{ENTRY_MIN_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::{Result, TwigError};
use fake::rand;
use std::io::{Cursor, Write};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Create a new empty index backed by `path`
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing index file is a valid state and yields an empty index.
    pub fn load(path: Box<Path>) -> Result<Self> {
        let content = match std::fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no index file, starting empty");
                return Ok(Index::new(path));
            }
            Err(e) => return Err(TwigError::io(path, e)),
        };

        let entries = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded index");

        Ok(Index { path, entries })
    }

    fn parse(content: &[u8]) -> Result<Vec<IndexEntry>> {
        let mut reader = Cursor::new(content);
        let header = IndexHeader::deserialize(&mut reader)?;

        let remaining = content.len() - HEADER_SIZE;
        let declared = header.entries_count as usize;
        if declared.saturating_mul(ENTRY_MIN_SIZE) > remaining {
            return Err(TwigError::CorruptIndex(format!(
                "{declared} entries declared but only {remaining} bytes follow the header"
            )));
        }

        let mut entries = Vec::with_capacity(declared);
        for _ in 0..declared {
            entries.push(IndexEntry::deserialize(&mut reader)?);
        }

        Ok(entries)
    }

    /// Write the whole index, re-deriving the header from the entries
    ///
    /// The content goes to a temporary file next to the index which is then
    /// renamed over it.
    pub fn save(&self) -> Result<()> {
        let mut content = IndexHeader::for_entries(self.entries.len() as u32)
            .serialize()
            .to_vec();
        for entry in &self.entries {
            content.extend_from_slice(&entry.serialize()?);
        }

        let index_dir = self.path.parent().ok_or_else(|| {
            TwigError::CorruptIndex(format!("invalid index path {}", self.path.display()))
        })?;
        let temp_path = index_dir.join(format!("index-{}.tmp", rand::random::<u32>()));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .map_err(|e| TwigError::io(&temp_path, e))?;
        file.write_all(&content)
            .and_then(|_| file.sync_all())
            .map_err(|e| TwigError::io(&temp_path, e))?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            TwigError::io(self.path.to_path_buf(), e)
        })?;
        tracing::debug!(path = %self.path.display(), entries = self.entries.len(), "saved index");

        Ok(())
    }

    /// Stage an entry, replacing an entry with the same path in place
    ///
    /// A new path first evicts the staged files it conflicts with: files
    /// standing where one of its parent directories would be, and files below
    /// it when it replaces a directory.
    pub fn add_entry(&mut self, entry: IndexEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.path == entry.path) {
            *existing = entry;
            return;
        }

        self.discard_conflicts(&entry);
        self.entries.push(entry);
    }

    fn discard_conflicts(&mut self, entry: &IndexEntry) {
        let parents = entry.parent_dirs();
        let children_prefix = format!("{}/", entry.path);

        self.entries.retain(|staged| {
            let conflicts = parents.contains(&staged.path.as_str())
                || staged.path.starts_with(&children_prefix);
            if conflicts {
                tracing::debug!(
                    path = %staged.path,
                    replaced_by = %entry.path,
                    "discarded conflicting entry"
                );
            }

            !conflicts
        });
    }

    /// Unstage a path; returns whether it was staged
    pub fn remove_entry(&mut self, path: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.path != path);

        before != self.entries.len()
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Entries in staging order
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Index entry representation
//!
//! Each entry in the index represents a staged file with:
//! - File path, relative to the work-tree root with `/` separators
//! - Content hash (blob object ID)
//! - File metadata (mode, size, modification time)
//!
//! ## Entry Format
//!
//! ```text
//! mtime seconds      4 bytes
//! mtime nanoseconds  4 bytes
//! mode               4 bytes (100644 or 100755)
//! size               4 bytes
//! object ID         20 bytes
//! path               variable, NUL-terminated
//! ```
//!
//! Entries follow each other without alignment padding.

use crate::artifacts::index::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, TwigError};
use byteorder::ByteOrder;
use bytes::Bytes;
use derive_new::new;
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::io::BufRead;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// Size of the fixed part of an entry (four u32 fields and the object ID)
pub const ENTRY_FIXED_SIZE: usize = 36;

/// Minimum size of an index entry in bytes (fixed part plus the path NUL)
pub const ENTRY_MIN_SIZE: usize = ENTRY_FIXED_SIZE + 1;

/// Index entry representing a staged file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to the work-tree root, the unique key of the index
    pub path: String,
    /// Blob hash of the file content
    pub oid: ObjectId,
    pub metadata: EntryMetadata,
}

impl IndexEntry {
    pub fn mode(&self) -> EntryMode {
        self.metadata.mode.into()
    }

    /// Last path component
    pub fn basename(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map_or(self.path.as_str(), |(_, name)| name)
    }

    /// Every ancestor directory, outermost first (`a`, `a/b` for `a/b/c`)
    pub fn parent_dirs(&self) -> Vec<&str> {
        self.path
            .match_indices('/')
            .map(|(at, _)| &self.path[..at])
            .collect()
    }

    /// Directory holding the entry, `""` for the work-tree root
    pub fn parent_dir(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(dir, _)| dir)
    }
}

/// File metadata cached in index entries
///
/// Times and size are truncated to 32 bits, as the on-disk format stores them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, new)]
pub struct EntryMetadata {
    /// Modification time (seconds since Unix epoch)
    pub mtime: u32,
    /// Modification time nanoseconds
    pub mtime_nsec: u32,
    pub mode: FileMode,
    /// File size in bytes
    pub size: u32,
}

impl EntryMetadata {
    /// Capture the metadata of a file on disk
    ///
    /// The mode is executable when any execute bit is set.
    pub fn from_fs(file_path: &Path, metadata: &Metadata) -> Self {
        let mode = match file_path.is_executable() {
            true => FileMode::Executable,
            false => FileMode::Regular,
        };

        EntryMetadata {
            mtime: metadata.mtime() as u32,
            mtime_nsec: metadata.mtime_nsec() as u32,
            mode,
            size: metadata.size() as u32,
        }
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> Result<Bytes> {
        let mut fields = [0u8; 16];
        byteorder::NetworkEndian::write_u32_into(
            &[
                self.metadata.mtime,
                self.metadata.mtime_nsec,
                self.mode().as_u32(),
                self.metadata.size,
            ],
            &mut fields,
        );

        let mut entry_bytes = Vec::with_capacity(ENTRY_MIN_SIZE + self.path.len());
        entry_bytes.extend_from_slice(&fields);
        entry_bytes.extend_from_slice(self.oid.as_bytes());
        entry_bytes.extend_from_slice(self.path.as_bytes());
        entry_bytes.push(0);

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut fixed = [0u8; ENTRY_FIXED_SIZE];
        reader
            .read_exact(&mut fixed)
            .map_err(|_| TwigError::CorruptIndex("truncated index entry".into()))?;

        let mtime = byteorder::NetworkEndian::read_u32(&fixed[0..4]);
        let mtime_nsec = byteorder::NetworkEndian::read_u32(&fixed[4..8]);
        let raw_mode = byteorder::NetworkEndian::read_u32(&fixed[8..12]);
        let size = byteorder::NetworkEndian::read_u32(&fixed[12..16]);
        let mut oid_bytes = [0u8; 20];
        oid_bytes.copy_from_slice(&fixed[16..36]);
        let oid = ObjectId::from_bytes(oid_bytes);

        let mode = EntryMode::try_from(raw_mode)
            .ok()
            .and_then(|mode| FileMode::try_from(mode).ok())
            .ok_or_else(|| TwigError::CorruptIndex(format!("unsupported file mode {raw_mode:o}")))?;

        // Extract the entry path, which is NUL-terminated
        let mut path = Vec::new();
        reader
            .read_until(0, &mut path)
            .map_err(|e| TwigError::CorruptIndex(e.to_string()))?;
        if path.pop() != Some(0) {
            return Err(TwigError::CorruptIndex(
                "missing NUL terminator in entry path".into(),
            ));
        }
        let path = String::from_utf8(path)
            .map_err(|_| TwigError::CorruptIndex("entry path is not UTF-8".into()))?;

        Ok(IndexEntry {
            path,
            oid,
            metadata: EntryMetadata {
                mtime,
                mtime_nsec,
                mode,
                size,
            },
        })
    }
}

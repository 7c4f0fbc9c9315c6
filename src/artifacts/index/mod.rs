//! Index file format
//!
//! The index (staging area) lists the paths that go into the next commit,
//! together with cached file metadata and blob hashes.
//!
//! ## File Format (Version 2)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length, no padding):
//!   - mtime seconds, mtime nanoseconds, mode, size (4 bytes each)
//!   - object ID (20 raw bytes)
//!   - NUL-terminated path
//! ```
//!
//! All integers are big-endian. There is no trailing checksum.

pub mod entry_mode;
pub mod index_entry;
pub mod index_header;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &str = "DIRC";

/// Index file format version
pub const VERSION: u32 = 2;

//! Data structures and codecs
//!
//! - `core`: Author identity resolution
//! - `index`: Index file entries, header and entry modes
//! - `objects`: Object types (blob, tree, commit), IDs and the tree builder

pub mod core;
pub mod index;
pub mod objects;

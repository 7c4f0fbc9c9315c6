//! Storage core errors
//!
//! Every area and artifact returns a [`TwigError`] instead of aborting. Commands
//! wrap these into `anyhow::Error` with extra context before they reach the user.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TwigError {
    /// Disk or permission failure, never retried
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt object: {0}")]
    CorruptObject(String),

    #[error("corrupt index: {0}")]
    CorruptIndex(String),

    #[error("malformed tree entry: {0}")]
    MalformedTreeEntry(String),

    #[error("invalid ref format: {0}")]
    InvalidRefFormat(String),

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("not a twig repository (or any of the parent directories): {0}")]
    RepositoryNotFound(PathBuf),

    #[error("invalid hash format: {0}")]
    InvalidHashFormat(String),

    #[error("unsupported index version: {0}")]
    UnsupportedIndexVersion(u32),
}

impl TwigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TwigError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TwigError>;

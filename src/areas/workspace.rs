//! Working tree access
//!
//! Lists candidate files for staging and reads their content and metadata.
//! Paths handed out are relative to the work-tree root and always use `/` as
//! the separator, which is the form the index stores.

use crate::artifacts::index::index_entry::EntryMetadata;
use crate::artifacts::objects::blob::Blob;
use crate::errors::{Result, TwigError};
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into or staged
const IGNORED_PATHS: [&str; 2] = [".twig", ".git"];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Regular files under `root` (a file or a directory inside the work tree)
    ///
    /// Directories are walked in file-name order, skipping the metadata
    /// directories. A plain file is returned as is.
    pub fn list_files(&self, root: &Path) -> Result<Vec<String>> {
        let root = self.normalize(root);
        let metadata = std::fs::metadata(&root).map_err(|e| TwigError::io(&root, e))?;

        if !metadata.is_dir() {
            return Ok(self.relative_path(&root).into_iter().collect());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.file_name().to_string_lossy().as_ref()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                TwigError::io(path, e.into())
            })?;

            if entry.file_type().is_file() {
                files.extend(self.relative_path(entry.path()));
            }
        }

        Ok(files)
    }

    fn is_ignored(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }

    /// Express `path` relative to the work-tree root, `/`-separated
    ///
    /// `.` and `..` components are resolved lexically. Returns `None` for paths
    /// outside the work tree, for the root itself and for paths inside the
    /// metadata directory.
    pub fn relative_path(&self, path: &Path) -> Option<String> {
        let normalized = self.normalize(path);
        let relative = normalized.strip_prefix(&self.path).ok()?;
        let parts = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;

        if parts.is_empty() || parts.iter().any(|part| Self::is_ignored(part)) {
            return None;
        }

        Some(parts.join("/"))
    }

    /// Whether `path` is the work-tree root or lies below it
    pub fn contains(&self, path: &Path) -> bool {
        self.normalize(path).starts_with(&self.path)
    }

    /// Absolute form of `path` with `.` and `..` resolved lexically
    fn normalize(&self, path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in self.path.join(path).components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                other => normalized.push(other),
            }
        }

        normalized
    }

    pub fn read_file(&self, file_path: &str) -> Result<Bytes> {
        let file_path = self.path.join(file_path);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .map_err(|e| TwigError::io(file_path, e))
    }

    pub fn parse_blob(&self, file_path: &str) -> Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Metadata for staging; only regular files can be staged
    pub fn stat_file(&self, file_path: &str) -> Result<EntryMetadata> {
        let full_path = self.path.join(file_path);
        let metadata = std::fs::metadata(&full_path).map_err(|e| TwigError::io(&full_path, e))?;

        if !metadata.is_file() {
            return Err(TwigError::io(
                &full_path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        Ok(EntryMetadata::from_fs(&full_path, &metadata))
    }
}

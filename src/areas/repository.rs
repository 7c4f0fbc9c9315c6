use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::{Result, TwigError};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the metadata directory at the work-tree root
pub const TWIG_DIR: &str = ".twig";

/// Branch HEAD points at in a fresh repository
pub const DEFAULT_BRANCH: &str = "main";

/// Handle to one repository: its areas and the writer commands print to
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository whose work tree is rooted at `path`
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let path = path.canonicalize().map_err(|e| TwigError::io(path, e))?;
        let twig_dir = path.join(TWIG_DIR);

        Ok(Repository {
            database: Database::new(twig_dir.join("objects").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(twig_dir.into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
        })
    }

    /// Open the repository containing `start`
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let root = Self::find_root(start)?;
        tracing::debug!(root = %root.display(), "found repository");

        Self::new(&root, writer)
    }

    /// Walk upward from `start` to the first directory holding `.twig`
    pub fn find_root(start: &Path) -> Result<PathBuf> {
        let start = start.canonicalize().map_err(|e| TwigError::io(start, e))?;

        let mut current = Some(start.as_path());
        while let Some(dir) = current {
            if dir.join(TWIG_DIR).is_dir() {
                return Ok(dir.to_path_buf());
            }
            current = dir.parent();
        }

        Err(TwigError::RepositoryNotFound(start))
    }

    /// Work-tree root
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn twig_path(&self) -> PathBuf {
        self.path.join(TWIG_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.twig_path().join("index")
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// Fresh copy of the staging area from disk
    pub fn load_index(&self) -> Result<Index> {
        Index::load(self.index_path().into_boxed_path())
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn discovery_walks_up_to_the_metadata_directory() {
        let dir = TempDir::new().unwrap();
        dir.child(".twig/objects").create_dir_all().unwrap();
        dir.child("a/b/c").create_dir_all().unwrap();

        let root = Repository::find_root(&dir.path().join("a/b/c")).unwrap();

        assert_eq!(root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn discovery_without_metadata_directory_fails() {
        let dir = TempDir::new().unwrap();
        dir.child("nested").create_dir_all().unwrap();

        // a stray .twig above the temp dir would make this meaningless
        if dir.path().ancestors().any(|p| p.join(TWIG_DIR).is_dir()) {
            return;
        }

        assert!(matches!(
            Repository::find_root(&dir.path().join("nested")),
            Err(TwigError::RepositoryNotFound(_))
        ));
    }
}

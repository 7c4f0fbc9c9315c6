//! Branch references and HEAD
//!
//! ## File Format
//!
//! - `refs/heads/<branch>`: the 40-character hash of the branch tip plus a
//!   newline. A missing file means the branch has no commits yet.
//! - `HEAD`: `ref: refs/heads/<branch>`, naming the current branch.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, TwigError};
use derive_new::new;
use std::path::{Path, PathBuf};

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

const HEADS_PREFIX: &str = "refs/heads/";

/// A branch and the commit it points to
///
/// `oid` is the zero sentinel while the branch has no commits.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Ref {
    pub branch: String,
    pub oid: ObjectId,
}

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.twig`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join(HEADS_PREFIX)
    }

    fn branch_path(&self, branch: &str) -> PathBuf {
        self.heads_path().join(branch)
    }

    /// Read a branch ref; an absent ref file yields the zero hash
    ///
    /// An empty branch name (a detached HEAD) is not a ref.
    pub fn find_ref(&self, branch: &str) -> Result<Ref> {
        if branch.is_empty() {
            return Err(TwigError::InvalidRefFormat("empty branch name".to_string()));
        }

        let ref_path = self.branch_path(branch);

        let content = match std::fs::read_to_string(&ref_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Ref::new(branch.to_string(), ObjectId::zero()));
            }
            Err(e) => return Err(TwigError::io(ref_path, e)),
        };

        let content = content.trim();
        let oid = ObjectId::try_parse(content).map_err(|_| {
            TwigError::InvalidRefFormat(format!("{}: {content:?}", ref_path.display()))
        })?;

        Ok(Ref::new(branch.to_string(), oid))
    }

    /// Point a branch at a commit, overwriting the ref file
    pub fn write_ref(&self, reference: &Ref) -> Result<()> {
        let ref_path = self.branch_path(&reference.branch);
        self.update_ref_file(&ref_path, format!("{}\n", reference.oid))?;
        tracing::debug!(branch = %reference.branch, oid = %reference.oid, "updated ref");

        Ok(())
    }

    /// Name of the branch HEAD points at
    ///
    /// Anything other than `ref: refs/heads/<name>` (a detached hash, another
    /// namespace, an empty file) yields an empty name.
    pub fn current_branch(&self) -> Result<String> {
        let head_path = self.head_path();
        let content = match std::fs::read_to_string(&head_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(String::new()),
            Err(e) => return Err(TwigError::io(head_path, e)),
        };

        let symref = regex::Regex::new(SYMREF_REGEX)
            .map_err(|e| TwigError::InvalidRefFormat(e.to_string()))?;
        let branch = symref
            .captures(content.trim())
            .and_then(|symref| {
                symref[1]
                    .strip_prefix(HEADS_PREFIX)
                    .map(|branch| branch.to_string())
            })
            .unwrap_or_default();

        Ok(branch)
    }

    /// Make HEAD a symbolic ref to `branch`
    pub fn set_head(&self, branch: &str) -> Result<()> {
        self.update_ref_file(&self.head_path(), format!("ref: {HEADS_PREFIX}{branch}\n"))
    }

    fn update_ref_file(&self, path: &Path, raw_ref: String) -> Result<()> {
        // create all the parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TwigError::io(parent, e))?;
        }

        std::fs::write(path, raw_ref).map_err(|e| TwigError::io(path, e))
    }
}

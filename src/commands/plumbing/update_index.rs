use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateIndexAction {
    Add,
    Remove,
}

impl Repository {
    /// Stage or unstage a single file
    ///
    /// Removing a path that is not staged leaves the index unchanged.
    pub fn update_index(&self, file: &Path, action: UpdateIndexAction) -> anyhow::Result<()> {
        let path = self.work_tree_path(file)?;
        let mut index = self.load_index().context("unable to load the index")?;

        match action {
            UpdateIndexAction::Add => {
                self.stage_file(&mut index, &path)?;
            }
            UpdateIndexAction::Remove => {
                if !index.remove_entry(&path) {
                    tracing::debug!(path, "path was not staged");
                }
            }
        }

        index.save().context("unable to write the index")?;

        Ok(())
    }

    /// Store the blob for a work-tree file and record it in `index`
    pub(crate) fn stage_file(&self, index: &mut Index, path: &str) -> anyhow::Result<ObjectId> {
        let metadata = self.workspace().stat_file(path)?;
        let blob = self.workspace().parse_blob(path)?;
        let blob_id = self
            .database()
            .store(&blob)
            .with_context(|| format!("unable to store blob for {path}"))?;

        index.add_entry(IndexEntry::new(path.to_string(), blob_id, metadata));
        tracing::debug!(path, %blob_id, "staged file");

        Ok(blob_id)
    }

    /// Work-tree relative form of a path given on the command line
    pub(crate) fn work_tree_path(&self, file: &Path) -> anyhow::Result<String> {
        let absolute = std::env::current_dir()
            .context("unable to read the current directory")?
            .join(file);

        self.workspace()
            .relative_path(&absolute)
            .with_context(|| format!("{} is outside the work tree", file.display()))
    }
}

use crate::areas::repository::Repository;
use anyhow::Context;
use std::path::PathBuf;

impl Repository {
    /// Stage files, expanding directories to every regular file below them
    ///
    /// The index is loaded once and saved once, after every path was staged.
    pub fn add(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        let mut index = self.load_index().context("unable to load the index")?;
        let current_dir = std::env::current_dir().context("unable to read the current directory")?;

        let mut files = Vec::new();
        for path in paths {
            let absolute = current_dir.join(path);
            if !self.workspace().contains(&absolute) {
                anyhow::bail!("{} is outside the work tree", path.display());
            }

            let listed = self
                .workspace()
                .list_files(&absolute)
                .with_context(|| format!("pathspec '{}' did not match any files", path.display()))?;
            files.extend(listed);
        }

        for file in files {
            self.stage_file(&mut index, &file)?;
        }

        index.save().context("unable to write the index")?;

        Ok(())
    }
}

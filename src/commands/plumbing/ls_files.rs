use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Print staged paths in index order, with mode and blob ID when `stage` is set
    pub fn ls_files(&self, stage: bool) -> anyhow::Result<()> {
        let index = self.load_index().context("unable to load the index")?;

        for entry in index.entries() {
            if stage {
                writeln!(
                    self.writer(),
                    "{} {} 0\t{}",
                    entry.mode().as_str(),
                    entry.oid,
                    entry.path
                )?;
            } else {
                writeln!(self.writer(), "{}", entry.path)?;
            }
        }

        Ok(())
    }
}

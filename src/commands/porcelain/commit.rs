use crate::areas::refs::Ref;
use crate::areas::repository::Repository;
use crate::artifacts::core::identity::{Identity, commit_timestamp};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Record the staged snapshot as a new commit on the current branch
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        if !self.index_path().exists() {
            anyhow::bail!("nothing staged to commit, use add or update-index to stage files");
        }

        let index = self.load_index().context("unable to load the index")?;
        let tree_id = self.store_trees(&index)?;

        let branch = self.refs().current_branch()?;
        if branch.is_empty() {
            anyhow::bail!("HEAD does not point at a branch");
        }
        let parent = self.refs().find_ref(&branch)?.oid;
        let is_root = parent.is_zero();

        let author = Identity::load().author(commit_timestamp());
        let message = message.trim().to_string();

        let commit = Commit::new(vec![parent], tree_id, author, message);
        let commit_id = self
            .database()
            .store(&commit)
            .context("unable to store the commit")?;
        self.refs()
            .write_ref(&Ref::new(branch.clone(), commit_id))
            .with_context(|| format!("unable to update branch {branch}"))?;

        tracing::info!(%branch, %commit_id, root = is_root, "created commit");
        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            branch,
            if is_root { " (root-commit)" } else { "" },
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}

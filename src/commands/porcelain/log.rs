use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Walk the first-parent chain of the current branch, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let branch = self.refs().current_branch()?;
        if branch.is_empty() {
            anyhow::bail!("HEAD does not point at a branch");
        }
        let head = self.refs().find_ref(&branch)?.oid;

        if head.is_zero() {
            anyhow::bail!("your current branch '{branch}' does not have any commits yet");
        }

        let mut curr_commit_oid = Some(head);
        while let Some(commit_oid) = curr_commit_oid {
            let commit = self
                .database()
                .parse_object_as_commit(&commit_oid)?
                .with_context(|| format!("object {commit_oid} is not a commit"))?;

            let decoration = if commit_oid == head {
                format!(" (HEAD -> {branch})")
            } else {
                String::new()
            };
            self.show_commit_medium(&commit_oid, &commit, &decoration)?;

            // Move to the parent commit for the next iteration
            curr_commit_oid = commit.parent().copied();
        }

        Ok(())
    }

    fn show_commit_medium(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
        decoration: &str,
    ) -> anyhow::Result<()> {
        writeln!(self.writer(), "commit {commit_oid}{decoration}")?;
        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}

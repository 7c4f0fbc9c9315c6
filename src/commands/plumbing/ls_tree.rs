use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// List a tree, given its ID or the ID of a commit pointing at it
    ///
    /// With `recursive`, subtrees are expanded in place and only blobs are
    /// printed, under their full path.
    pub fn ls_tree(&self, object_id: &str, recursive: bool) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;
        let tree = self.resolve_tree(&object_id)?;

        self.print_tree(&tree, "", recursive)
    }

    fn resolve_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        let object = self
            .database()
            .parse_object(object_id)
            .with_context(|| format!("unable to read object {object_id}"))?;

        match object {
            ObjectBox::Tree(tree) => Ok(*tree),
            ObjectBox::Commit(commit) => self
                .database()
                .parse_object_as_tree(commit.tree_oid())?
                .with_context(|| format!("commit {object_id} does not point at a tree")),
            ObjectBox::Blob(_) => anyhow::bail!("not a tree object: {object_id}"),
        }
    }

    fn print_tree(&self, tree: &Tree, prefix: &str, recursive: bool) -> anyhow::Result<()> {
        for entry in tree.sorted_entries() {
            let path = format!("{prefix}{}", entry.name);

            if recursive && entry.mode.is_tree() {
                let subtree = self
                    .database()
                    .parse_object_as_tree(&entry.oid)?
                    .with_context(|| format!("{path} is not a tree"))?;
                self.print_tree(&subtree, &format!("{path}/"), recursive)?;
                continue;
            }

            writeln!(
                self.writer(),
                "{} {} {}\t{}",
                entry.mode.as_str(),
                entry.object_type(),
                entry.oid,
                path
            )?;
        }

        Ok(())
    }
}

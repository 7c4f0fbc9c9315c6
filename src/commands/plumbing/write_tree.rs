use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree_builder::TreeBuilder;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Store the trees describing the index and print the root tree ID
    pub fn write_tree(&self) -> anyhow::Result<ObjectId> {
        let index = self.load_index().context("unable to load the index")?;
        let root = self.store_trees(&index)?;

        writeln!(self.writer(), "{}", root)?;

        Ok(root)
    }

    /// Build every tree for `index`, persist them and return the root ID
    pub(crate) fn store_trees(&self, index: &Index) -> anyhow::Result<ObjectId> {
        let hierarchy = TreeBuilder::build(index)?;

        for (dir, tree) in hierarchy.trees() {
            self.database()
                .store(tree)
                .with_context(|| format!("unable to store tree for {dir:?}"))?;
        }

        hierarchy
            .root()
            .oid()
            .context("root tree was not sealed")
    }
}

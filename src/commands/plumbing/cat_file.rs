use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// The object type
    Type,
    /// The object content, pretty-printed for trees
    Pretty,
}

impl Repository {
    pub fn cat_file(&self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;
        let object = self
            .database()
            .parse_object(&object_id)
            .with_context(|| format!("unable to read object {object_id}"))?;

        if mode == CatFileMode::Type {
            writeln!(self.writer(), "{}", object.object_type())?;
            return Ok(());
        }

        match object {
            ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
            ObjectBox::Tree(tree) => {
                for line in tree.display().lines() {
                    writeln!(self.writer(), "{line}")?;
                }
            }
            ObjectBox::Commit(commit) => writeln!(self.writer(), "{}", commit.display())?,
        }

        Ok(())
    }
}

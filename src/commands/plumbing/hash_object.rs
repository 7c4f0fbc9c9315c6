use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

/// Blob ID of a file, without touching any repository
pub fn hash_file(file: &Path) -> anyhow::Result<ObjectId> {
    let blob = read_blob(file)?;
    Ok(blob.object_id()?)
}

fn read_blob(file: &Path) -> anyhow::Result<Blob> {
    let content = std::fs::read(file)
        .with_context(|| format!("unable to read {}", file.display()))?;

    Ok(Blob::new(Bytes::from(content)))
}

impl Repository {
    /// Print the blob ID of `file`, storing the blob when `write` is set
    pub fn hash_object(&self, file: &Path, write: bool) -> anyhow::Result<ObjectId> {
        let blob = read_blob(file)?;

        let object_id = if write {
            self.database()
                .store(&blob)
                .with_context(|| format!("unable to store {}", file.display()))?
        } else {
            blob.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }
}

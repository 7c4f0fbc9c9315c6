//! Object database
//!
//! Stores zlib-compressed object envelopes as loose files under
//! `.twig/objects/<2>/<38>`, keyed by object ID.
//!
//! Writes go to a temporary file in the target directory which is then renamed
//! into place, so a reader never observes a half-written object. Racing writers
//! of the same ID produce identical bytes.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Result, TwigError};
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).exists()
    }

    /// Persist an envelope under its ID
    ///
    /// An object that is already present is left untouched.
    pub fn write(&self, object_id: &ObjectId, envelope: &[u8]) -> Result<()> {
        let object_path = self.object_path(object_id);
        if object_path.exists() {
            tracing::debug!(%object_id, "object already stored");
            return Ok(());
        }

        let object_dir = object_path.parent().ok_or_else(|| {
            TwigError::CorruptObject(format!("invalid object path {}", object_path.display()))
        })?;
        std::fs::create_dir_all(object_dir).map_err(|e| TwigError::io(object_dir, e))?;

        self.write_object(object_dir, &object_path, envelope)?;
        tracing::debug!(%object_id, size = envelope.len(), "stored object");

        Ok(())
    }

    /// Load the decompressed envelope of an object
    pub fn read(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.object_path(object_id);

        let compressed = match std::fs::read(&object_path) {
            Ok(compressed) => compressed,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TwigError::ObjectNotFound(*object_id));
            }
            Err(e) => return Err(TwigError::io(object_path, e)),
        };

        let envelope = Self::decompress(&compressed)
            .map_err(|e| TwigError::CorruptObject(format!("{object_id}: {e}")))?;
        tracing::debug!(%object_id, size = envelope.len(), "read object");

        Ok(envelope)
    }

    /// Serialize, hash and persist an object, returning its ID
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let envelope = object.serialize()?;
        let object_id = ObjectId::compute(&envelope);

        self.write(&object_id, &envelope)?;

        Ok(object_id)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        ObjectBox::parse(self.read(object_id)?)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Option<Blob>> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(Some(*blob)),
            _ => Ok(None),
        }
    }

    /// Load a tree, remembering the ID it was loaded under
    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Option<Tree>> {
        match self.parse_object(object_id)? {
            ObjectBox::Tree(tree) => Ok(Some((*tree).with_oid(*object_id))),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Option<Commit>> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(Some(*commit)),
            _ => Ok(None),
        }
    }

    fn write_object(&self, object_dir: &Path, object_path: &Path, envelope: &[u8]) -> Result<()> {
        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let object_content = Self::compress(envelope).map_err(|e| TwigError::io(object_path, e))?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .map_err(|e| TwigError::io(&temp_object_path, e))?;
        file.write_all(&object_content)
            .map_err(|e| TwigError::io(&temp_object_path, e))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_object_path);
            TwigError::io(object_path, e)
        })
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(data: &[u8]) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

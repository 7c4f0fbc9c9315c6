//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 20-byte SHA-1 digests computed over an object's full envelope
//! (`<type> <length>\0<payload>`). They are rendered as 40 lowercase hex
//! characters and uniquely identify blobs, trees and commits.
//!
//! ## Storage
//!
//! Objects are stored in `.twig/objects/<first-2-chars>/<remaining-38-chars>`
//!
//! ## Absence
//!
//! The all-zero ID is the "absent" sentinel: no parent commit, no commit on a
//! branch yet.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_SIZE};
use crate::errors::{Result, TwigError};
use sha1::{Digest, Sha1};
use std::io;
use std::path::PathBuf;

/// Object identifier (SHA-1 digest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_SIZE]);

impl ObjectId {
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// The zero sentinel
    pub const fn zero() -> Self {
        Self([0; OBJECT_ID_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_SIZE] {
        &self.0
    }

    /// Hash a full object envelope
    ///
    /// Callers must pass the header together with the payload; hashing the
    /// payload alone produces IDs no other tool agrees with.
    pub fn compute(envelope: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(envelope);

        let mut bytes = [0u8; OBJECT_ID_SIZE];
        bytes.copy_from_slice(hasher.finalize().as_slice());
        Self(bytes)
    }

    /// Parse and validate an object ID from its 40-character hex form
    pub fn try_parse(id: &str) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(TwigError::InvalidHashFormat(format!(
                "expected {} hex characters, got {}",
                OBJECT_ID_LENGTH,
                id.len()
            )));
        }

        let mut bytes = [0u8; OBJECT_ID_SIZE];
        hex::decode_to_slice(id, &mut bytes)
            .map_err(|e| TwigError::InvalidHashFormat(format!("{id}: {e}")))?;

        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Write the raw 20 bytes, as embedded in tree entries and the index
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.0)
    }

    /// Read the raw 20 bytes, as embedded in tree entries and the index
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut bytes = [0u8; OBJECT_ID_SIZE];
        reader.read_exact(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hex form
    pub fn to_short_oid(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(7);
        hex
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = TwigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"blob 4\0test".as_slice(), "30d74d258442c7c65512eafab474568dd706c430")]
    #[case(b"blob 0\0".as_slice(), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391")]
    #[case(b"tree 0\0".as_slice(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904")]
    fn compute_matches_reference_hashes(#[case] envelope: &[u8], #[case] expected: &str) {
        assert_eq!(ObjectId::compute(envelope).to_hex(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("30d74d258442c7c65512eafab474568dd706c43")]
    #[case("30d74d258442c7c65512eafab474568dd706c4300")]
    #[case("zzd74d258442c7c65512eafab474568dd706c430")]
    fn try_parse_rejects_malformed_hex(#[case] input: &str) {
        assert!(matches!(
            ObjectId::try_parse(input),
            Err(TwigError::InvalidHashFormat(_))
        ));
    }

    #[test]
    fn zero_sentinel_is_empty() {
        assert!(ObjectId::zero().is_zero());
        assert!(ObjectId::default().is_zero());
        assert!(!ObjectId::compute(b"blob 0\0").is_zero());
    }

    #[test]
    fn object_path_splits_after_two_characters() {
        let oid = ObjectId::try_parse("30d74d258442c7c65512eafab474568dd706c430").unwrap();
        assert_eq!(
            oid.to_path(),
            PathBuf::from("30").join("d74d258442c7c65512eafab474568dd706c430")
        );
        assert_eq!(oid.to_short_oid(), "30d74d2");
    }

    #[test]
    fn raw_bytes_round_trip() {
        let oid = ObjectId::compute(b"blob 4\0test");
        let mut raw = Vec::new();
        oid.write_h40_to(&mut raw).unwrap();
        assert_eq!(raw.len(), OBJECT_ID_SIZE);

        let read = ObjectId::read_h40_from(&mut raw.as_slice()).unwrap();
        assert_eq!(read, oid);
    }

    proptest! {
        #[test]
        fn hex_round_trip(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
            let oid = ObjectId::compute(&payload);
            prop_assert_eq!(ObjectId::try_parse(&oid.to_hex()).unwrap(), oid);
        }
    }
}

use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::{Result, TwigError};
use byteorder::ByteOrder;
use bytes::Bytes;
use derive_new::new;
use std::io::Read;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub(crate) marker: [u8; 4],
    pub(crate) version: u32,
    pub(crate) entries_count: u32,
}

impl IndexHeader {
    /// Header for an index holding `entries_count` entries
    pub(crate) fn for_entries(entries_count: u32) -> Self {
        let mut marker = [0u8; 4];
        marker.copy_from_slice(SIGNATURE.as_bytes());

        IndexHeader {
            marker,
            version: VERSION,
            entries_count,
        }
    }

    pub(crate) fn serialize(&self) -> Bytes {
        // marker, version and entries_count, packed as "a4N2"
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(&self.marker);
        bytes.extend_from_slice(&self.version.to_be_bytes());
        bytes.extend_from_slice(&self.entries_count.to_be_bytes());

        Bytes::from(bytes)
    }

    /// Read and validate the header at the start of an index file
    pub(crate) fn deserialize(reader: &mut impl Read) -> Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader
            .read_exact(&mut bytes)
            .map_err(|_| TwigError::CorruptIndex("index file shorter than its header".into()))?;

        let mut marker = [0u8; 4];
        marker.copy_from_slice(&bytes[0..4]);
        if marker != SIGNATURE.as_bytes() {
            return Err(TwigError::CorruptIndex(format!(
                "bad signature {:?}",
                String::from_utf8_lossy(&marker)
            )));
        }

        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);
        if version != VERSION {
            return Err(TwigError::UnsupportedIndexVersion(version));
        }

        let entries_count = byteorder::NetworkEndian::read_u32(&bytes[8..12]);

        Ok(IndexHeader {
            marker,
            version,
            entries_count,
        })
    }
}

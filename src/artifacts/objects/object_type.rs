use crate::errors::{Result, TwigError};
use bytes::Bytes;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Wrap a payload in the `<type> <length>\0` envelope
    pub fn envelope(&self, payload: &[u8]) -> Bytes {
        let header = format!("{} {}\0", self.as_str(), payload.len());

        let mut envelope = Vec::with_capacity(header.len() + payload.len());
        envelope.extend_from_slice(header.as_bytes());
        envelope.extend_from_slice(payload);

        Bytes::from(envelope)
    }

    /// Consume the envelope header from `data_reader`
    ///
    /// Leaves the reader positioned at the first payload byte and returns the
    /// object type with the declared payload length. The declared length is
    /// not checked against the payload.
    pub fn parse_object_type(data_reader: &mut impl BufRead) -> Result<(ObjectType, usize)> {
        let mut header = Vec::new();
        data_reader
            .read_until(b'\0', &mut header)
            .map_err(|e| TwigError::CorruptObject(format!("unreadable header: {e}")))?;

        if header.pop() != Some(b'\0') {
            return Err(TwigError::CorruptObject(
                "missing NUL after object header".to_string(),
            ));
        }

        let header = std::str::from_utf8(&header)
            .map_err(|_| TwigError::CorruptObject("object header is not ASCII".to_string()))?;
        let (object_type, size) = header
            .split_once(' ')
            .ok_or_else(|| TwigError::CorruptObject(format!("invalid object header: {header}")))?;

        let size = size
            .parse::<usize>()
            .map_err(|_| TwigError::CorruptObject(format!("invalid object size: {size}")))?;

        Ok((ObjectType::try_from(object_type)?, size))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = TwigError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(TwigError::CorruptObject(format!(
                "unknown object type: {value}"
            ))),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

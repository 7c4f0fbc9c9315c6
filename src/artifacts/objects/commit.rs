//! Commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID (absent for the first commit on a branch)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! ## Parsing
//!
//! Header lines are scanned by tag. A missing or unparsable field is
//! zero-filled (and logged) instead of failing the whole commit.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, TwigError};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::io::BufRead;

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    pub fn new(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// "Name <email> timestamp timezone", as stored in the commit
    pub fn display(&self) -> String {
        format!(
            "{} {} {}",
            self.display_name(),
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    /// Parse "name <email> timestamp timezone" without failing
    ///
    /// An unparsable timestamp or timezone becomes the Unix epoch at +0000;
    /// text without `<email>` is taken whole as the name.
    pub fn parse_lenient(value: &str) -> Self {
        let (identity, timestamp) = match value.rsplitn(3, ' ').collect::<Vec<_>>()[..] {
            [timezone, seconds, identity] => (identity, parse_timestamp(seconds, timezone)),
            _ => (value, None),
        };

        let timestamp = timestamp.unwrap_or_else(|| {
            tracing::warn!(value, "unparsable commit timestamp, using the epoch");
            epoch()
        });

        let (name, email) = match (identity.find('<'), identity.rfind('>')) {
            (Some(start), Some(end)) if start < end => (
                identity[..start].trim().to_string(),
                identity[start + 1..end].to_string(),
            ),
            _ => (identity.trim().to_string(), String::new()),
        };

        Author {
            name,
            email,
            timestamp,
        }
    }
}

fn epoch() -> DateTime<FixedOffset> {
    DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
}

fn parse_timestamp(seconds: &str, timezone: &str) -> Option<DateTime<FixedOffset>> {
    let seconds = seconds.parse::<i64>().ok()?;
    let offset = parse_offset(timezone)?;

    Some(DateTime::<Utc>::from_timestamp(seconds, 0)?.with_timezone(&offset))
}

/// Parse a "+HHMM" / "-HHMM" offset
fn parse_offset(timezone: &str) -> Option<FixedOffset> {
    if timezone.len() != 5 || !timezone.is_char_boundary(1) {
        return None;
    }

    let (sign, digits) = timezone.split_at(1);
    let sign = match sign {
        "+" => 1,
        "-" => -1,
        _ => return None,
    };
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Commit object
///
/// Contains references to:
/// - The tree representing the state of files
/// - Parent commit for history (zero or one)
/// - Author and committer information
/// - Commit message
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs, never containing the zero sentinel
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a new commit; the author is also recorded as committer
    ///
    /// Zero parent IDs are dropped, so a branch without commits yields a root
    /// commit.
    pub fn new(
        parents: Vec<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parents: parents.into_iter().filter(|p| !p.is_zero()).collect(),
            tree_oid,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    /// First line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.author.timestamp()
    }

    fn payload(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid));
        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        Ok(self.object_type().envelope(self.payload().as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|e| TwigError::CorruptObject(format!("unreadable commit: {e}")))?;
        let content = String::from_utf8_lossy(&raw).into_owned();

        let (headers, message) = content.split_once("\n\n").unwrap_or((&content, ""));

        let mut tree_oid = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        for line in headers.lines() {
            let Some((tag, value)) = line.split_once(' ') else {
                continue;
            };

            match tag {
                "tree" => tree_oid = parse_oid_field(tag, value),
                "parent" => parents.extend(parse_oid_field(tag, value)),
                "author" => author = Some(Author::parse_lenient(value)),
                "committer" => committer = Some(Author::parse_lenient(value)),
                _ => tracing::debug!(tag, "skipping unknown commit header"),
            }
        }

        let tree_oid = tree_oid.unwrap_or_else(|| {
            tracing::warn!("commit has no tree line, using the zero hash");
            ObjectId::zero()
        });
        let author = author.unwrap_or_else(|| {
            tracing::warn!("commit has no author line");
            Author::new(String::new(), String::new(), epoch())
        });
        let committer = committer.unwrap_or_else(|| author.clone());

        Ok(Commit {
            parents: parents.into_iter().filter(|p| !p.is_zero()).collect(),
            tree_oid,
            author,
            committer,
            message: message.to_string(),
        })
    }
}

fn parse_oid_field(tag: &str, value: &str) -> Option<ObjectId> {
    match ObjectId::try_parse(value.trim()) {
        Ok(oid) => Some(oid),
        Err(e) => {
            tracing::warn!(tag, error = %e, "unparsable commit hash field");
            None
        }
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.payload()
    }
}

//! Commit object
//!
//! A commit is an immutable snapshot record. Unlike git there is no tree
//! object in between: the commit itself lists every tracked path together
//! with the blob holding its content.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <commit-sha>            (zero, one or two lines; ordinary parent first)
//! date <rfc3339 timestamp with nanoseconds>
//! file <blob-sha> <path>         (one line per tracked path, sorted by path)
//!
//! <commit message>
//! ```
//!
//! The timestamp carries nanoseconds so two commits made back to back with the
//! same parent, message and files still get distinct identifiers.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Repository-relative path -> blob ID, the complete snapshot of a commit
pub type FileMap = BTreeMap<PathBuf, ObjectId>;

/// Most parents a commit may record: the ordinary parent and a merged-in one
pub const MAX_PARENTS: usize = 2;

/// Slim representation of a commit
///
/// Only what ancestry searches need: identity, parents, and the timestamp used
/// to order the walk.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
    pub timestamp: DateTime<FixedOffset>,
}

impl PartialOrd for SlimCommit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlimCommit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.oid.cmp(&other.oid))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Empty for the first commit, two entries for a merge commit
    parents: Vec<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    message: String,
    files: FileMap,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        files: FileMap,
        message: String,
        timestamp: DateTime<FixedOffset>,
    ) -> anyhow::Result<Self> {
        if parents.len() > MAX_PARENTS {
            anyhow::bail!(
                "a commit has at most {} parents, got {}",
                MAX_PARENTS,
                parents.len()
            );
        }

        Ok(Commit {
            parents,
            timestamp,
            message,
            files,
        })
    }

    /// The ordinary (first) parent
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    /// The merged-in parent, present only on merge commits
    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp as e.g. "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn files(&self) -> &FileMap {
        &self.files
    }

    pub fn into_files(self) -> FileMap {
        self.files
    }

    pub fn blob_for(&self, path: &Path) -> Option<&ObjectId> {
        self.files.get(path)
    }

    pub fn to_slim(&self) -> anyhow::Result<SlimCommit> {
        Ok(SlimCommit {
            oid: self.object_id()?,
            parents: self.parents.clone(),
            timestamp: self.timestamp,
        })
    }

    fn header_lines(&self) -> anyhow::Result<Vec<String>> {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!(
            "date {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, false)
        ));
        for (path, oid) in &self.files {
            let path = path
                .to_str()
                .with_context(|| format!("path is not valid UTF-8: {}", path.display()))?;
            if path.contains('\n') {
                anyhow::bail!("path contains a newline: {:?}", path);
            }
            lines.push(format!("file {} {}", oid, path));
        }

        Ok(lines)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = format!("{}\n\n{}", self.header_lines()?.join("\n"), self.message);
        frame(self.object_type(), body.as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut files = FileMap::new();

        for line in header.lines() {
            let (key, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {line:?}"))?;

            match key {
                "parent" => parents.push(ObjectId::try_parse(value.to_string())?),
                "date" => {
                    timestamp = Some(
                        DateTime::parse_from_rfc3339(value)
                            .context("Invalid commit object: invalid date line")?,
                    )
                }
                "file" => {
                    let (oid, path) = value
                        .split_once(' ')
                        .context("Invalid commit object: invalid file line")?;
                    files.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown header {key:?}"),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing date line")?;

        Self::new(parents, files, message.to_string(), timestamp)
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = self.header_lines().unwrap_or_default();
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

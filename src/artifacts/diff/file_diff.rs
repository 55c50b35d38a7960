use crate::artifacts::diff::line_diff::{LineChange, line_diff, split_lines};
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Added(ObjectId),
    Removed(ObjectId),
    Modified { old: ObjectId, new: ObjectId },
}

impl FileChange {
    pub fn from_entries(old: Option<&ObjectId>, new: Option<&ObjectId>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(FileChange::Added(new.clone())),
            (Some(old), None) => Some(FileChange::Removed(old.clone())),
            (Some(old), Some(new)) if old != new => Some(FileChange::Modified {
                old: old.clone(),
                new: new.clone(),
            }),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileChange::Added(_) => "added",
            FileChange::Removed(_) => "removed",
            FileChange::Modified { .. } => "changed",
        }
    }

    pub fn old_oid(&self) -> Option<&ObjectId> {
        match self {
            FileChange::Removed(oid) | FileChange::Modified { old: oid, .. } => Some(oid),
            FileChange::Added(_) => None,
        }
    }

    pub fn new_oid(&self) -> Option<&ObjectId> {
        match self {
            FileChange::Added(oid) | FileChange::Modified { new: oid, .. } => Some(oid),
            FileChange::Removed(_) => None,
        }
    }
}

/// One changed path together with its line-level report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub change: FileChange,
    pub lines: Vec<LineChange>,
}

/// Compare two snapshots path by path, in path order
///
/// `load_blob` fetches content for the paths that differ; paths with equal
/// blob IDs on both sides are never loaded.
pub fn diff_file_maps<BlobLoaderFn>(
    old: &FileMap,
    new: &FileMap,
    load_blob: BlobLoaderFn,
) -> anyhow::Result<Vec<FileDiff>>
where
    BlobLoaderFn: Fn(&ObjectId) -> anyhow::Result<Bytes>,
{
    let paths = old.keys().chain(new.keys()).collect::<BTreeSet<_>>();
    let mut diffs = Vec::new();

    for path in paths {
        let Some(change) = FileChange::from_entries(old.get(path), new.get(path)) else {
            continue;
        };

        let old_lines = match change.old_oid() {
            Some(oid) => split_lines(&load_blob(oid)?),
            None => Vec::new(),
        };
        let new_lines = match change.new_oid() {
            Some(oid) => split_lines(&load_blob(oid)?),
            None => Vec::new(),
        };

        diffs.push(FileDiff {
            path: path.clone(),
            lines: line_diff(&old_lines, &new_lines),
            change,
        });
    }

    Ok(diffs)
}

//! Three-way merge
//!
//! - `bca_finder`: best common ancestor search over the commit graph
//! - `resolution`: per-path reconciliation of base, ours and theirs
//! - `conflict`: conflict-marked file content

pub mod bca_finder;
pub mod conflict;
pub mod resolution;

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// How a merge ended
///
/// A conflicted merge is an ordinary outcome, not an error: the working
/// directory holds conflict-marked files and `MERGE_HEAD` stays in place
/// until the operator commits a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The target is already reachable from HEAD; nothing was written
    UpToDate,
    /// Every path reconciled; a two-parent commit was created
    CleanMerge { commit: ObjectId },
    /// Some paths changed on both sides; no commit was created
    ConflictedMerge { conflicts: Vec<PathBuf> },
}

impl MergeOutcome {
    pub fn is_conflicted(&self) -> bool {
        matches!(self, MergeOutcome::ConflictedMerge { .. })
    }
}

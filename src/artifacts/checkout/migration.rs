//! Checkout migration
//!
//! A migration describes how to turn the working directory of one commit into
//! that of another:
//!
//! - every path of the target snapshot is written from its blob, overwriting
//!   whatever is on disk
//! - every path tracked by the previous snapshot but absent from the target
//!   is deleted
//!
//! Untracked files are never touched.

use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migration {
    writes: FileMap,
    deletions: BTreeSet<PathBuf>,
}

impl Migration {
    /// Plan the move from `current` (nothing checked out when `None`) to `target`
    pub fn plan(current: Option<&FileMap>, target: &FileMap) -> Self {
        let deletions = current
            .map(|current| {
                current
                    .keys()
                    .filter(|path| !target.contains_key(*path))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Migration {
            writes: target.clone(),
            deletions,
        }
    }

    pub fn writes(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.writes.iter()
    }

    pub fn deletions(&self) -> impl Iterator<Item = &PathBuf> {
        self.deletions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.deletions.is_empty()
    }
}

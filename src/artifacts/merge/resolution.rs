//! Per-path three-way reconciliation
//!
//! Given the snapshots of the merge base, our commit and their commit, every
//! path is resolved on its own:
//!
//! | base | ours | theirs | result                                   |
//! |------|------|--------|------------------------------------------|
//! | any  | none | T      | take T                                   |
//! | B    | B    | T      | take T                                   |
//! | any  | O    | O      | keep O                                   |
//! | T    | O    | T      | keep O (only we changed it)              |
//! | any  | O    | T      | conflict (both changed it differently)   |
//! | none | O    | none   | keep O (only we added it)                |
//! | B    | B    | none   | delete (they removed it, we did not edit)|
//! | B    | O    | none   | conflict (we edited, they removed)       |
//!
//! Paths missing from both sides stay missing.

use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// What the merge does to one path of the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Write their blob at the path
    Apply(ObjectId),
    /// Remove the path
    Delete,
    /// Write conflict markers around both sides; a missing side is empty
    Conflict {
        ours: Option<ObjectId>,
        theirs: Option<ObjectId>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResolution {
    actions: BTreeMap<PathBuf, MergeAction>,
    /// Snapshot of the merge result; conflicted paths keep our side
    merged: FileMap,
}

impl MergeResolution {
    pub fn resolve(base: &FileMap, ours: &FileMap, theirs: &FileMap) -> Self {
        let mut resolution = MergeResolution {
            actions: BTreeMap::new(),
            merged: ours.clone(),
        };

        let paths = ours
            .keys()
            .chain(theirs.keys())
            .cloned()
            .collect::<BTreeSet<_>>();

        for path in paths {
            let base_oid = base.get(&path);
            let our_oid = ours.get(&path);
            let their_oid = theirs.get(&path);

            if let Some(action) = Self::resolve_path(base_oid, our_oid, their_oid) {
                tracing::debug!(path = %path.display(), ?action, "merge action");
                resolution.record(path, action);
            }
        }

        resolution
    }

    fn resolve_path(
        base: Option<&ObjectId>,
        ours: Option<&ObjectId>,
        theirs: Option<&ObjectId>,
    ) -> Option<MergeAction> {
        match (ours, theirs) {
            (None, None) => None,
            (None, Some(theirs)) => Some(MergeAction::Apply(theirs.clone())),
            (Some(ours), Some(theirs)) if ours == theirs => None,
            (Some(ours), Some(theirs)) if Some(ours) == base => {
                debug_assert_ne!(ours, theirs);
                Some(MergeAction::Apply(theirs.clone()))
            }
            (Some(_), Some(theirs)) if Some(theirs) == base => None,
            (Some(ours), Some(theirs)) => Some(MergeAction::Conflict {
                ours: Some(ours.clone()),
                theirs: Some(theirs.clone()),
            }),
            (Some(_), None) if base.is_none() => None,
            (Some(ours), None) if Some(ours) == base => Some(MergeAction::Delete),
            (Some(ours), None) => Some(MergeAction::Conflict {
                ours: Some(ours.clone()),
                theirs: None,
            }),
        }
    }

    fn record(&mut self, path: PathBuf, action: MergeAction) {
        match &action {
            MergeAction::Apply(oid) => {
                self.merged.insert(path.clone(), oid.clone());
            }
            MergeAction::Delete => {
                self.merged.remove(&path);
            }
            MergeAction::Conflict { .. } => {}
        }

        self.actions.insert(path, action);
    }

    pub fn actions(&self) -> impl Iterator<Item = (&PathBuf, &MergeAction)> {
        self.actions.iter()
    }

    pub fn conflicts(&self) -> Vec<PathBuf> {
        self.actions
            .iter()
            .filter(|(_, action)| matches!(action, MergeAction::Conflict { .. }))
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts().is_empty()
    }

    pub fn merged_files(&self) -> &FileMap {
        &self.merged
    }

    pub fn into_merged_files(self) -> FileMap {
        self.merged
    }
}

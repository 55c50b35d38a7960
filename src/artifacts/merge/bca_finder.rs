//! Best common ancestor finder
//!
//! Finds the merge base of two commits over the full commit graph, following
//! every parent edge rather than only first parents.
//!
//! ## Algorithm Overview
//!
//! ### Phase 1: Find All Common Ancestors
//!
//! A bidirectional traversal explores the history of both commits:
//! - Commits are processed newest first (priority queue keyed on timestamp)
//! - Each commit records whether it was reached from the source side, the
//!   target side, or both
//! - A commit reached from both sides is a common ancestor; its own
//!   ancestors are marked STALE and stop propagating
//!
//! ### Phase 2: Filter to Best Common Ancestors
//!
//! > A best common ancestor of X and Y is any common ancestor of X and Y that
//! > is not an ancestor of any other common ancestor.
//!
//! Each candidate is walked against the remaining candidates; a candidate
//! reachable from another one is redundant.
//!
//! When several best common ancestors remain (criss-cross histories), the
//! newest one wins, then the smallest ID, so the result is deterministic.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b100; // ancestor of a known common ancestor
        const RESULT = 0b1000; // common ancestor
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Finds the best common ancestor of two commits
///
/// The loader is any function mapping a commit ID to its [`SlimCommit`], so
/// the finder works the same against the object database or an in-memory
/// graph.
pub struct BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Walk both sides of the graph and record how each commit was reached
    fn walk_from_both_sides(
        &self,
        source_commit_id: &ObjectId,
        target_commit_ids: &HashSet<&ObjectId>,
    ) -> anyhow::Result<HashMap<ObjectId, VisitState>> {
        if target_commit_ids.contains(source_commit_id) {
            return Ok(HashMap::from([(
                source_commit_id.clone(),
                VisitState::VISITED_FROM_BOTH | VisitState::RESULT,
            )]));
        }

        let mut ancestors_states = HashMap::<ObjectId, VisitState>::new();
        let mut priority_queue = BinaryHeap::new();

        let source_commit = (self.commit_loader)(source_commit_id)?;
        ancestors_states.insert(source_commit.oid.clone(), VisitState::VISITED_FROM_SOURCE);
        priority_queue.push((source_commit.timestamp, source_commit.oid));

        for &target_commit_id in target_commit_ids {
            let target_commit = (self.commit_loader)(target_commit_id)?;
            ancestors_states.insert(target_commit.oid.clone(), VisitState::VISITED_FROM_TARGET);
            priority_queue.push((target_commit.timestamp, target_commit.oid));
        }

        while let Some((_, commit_id)) = priority_queue.pop() {
            let current_state = ancestors_states
                .get(&commit_id)
                .copied()
                .unwrap_or(VisitState::NONE);

            tracing::trace!(oid = %commit_id, state = %current_state, "visiting commit");

            if current_state.contains(VisitState::STALE) {
                continue;
            }

            let is_common_ancestor = current_state.contains(VisitState::VISITED_FROM_BOTH);
            let current_state = if is_common_ancestor {
                let marked = current_state | VisitState::RESULT;
                ancestors_states.insert(commit_id.clone(), marked);
                marked
            } else {
                current_state
            };

            let current_commit = (self.commit_loader)(&commit_id)?;
            for parent_id in &current_commit.parents {
                let parent_state = ancestors_states
                    .get(parent_id)
                    .copied()
                    .unwrap_or(VisitState::NONE);

                let mut new_state =
                    parent_state | (current_state & VisitState::VISITED_FROM_BOTH);
                if is_common_ancestor {
                    new_state |= VisitState::STALE;
                }

                if new_state != parent_state {
                    let parent_commit = (self.commit_loader)(parent_id)?;
                    ancestors_states.insert(parent_id.clone(), new_state);
                    priority_queue.push((parent_commit.timestamp, parent_id.clone()));
                }
            }
        }

        Ok(ancestors_states)
    }

    fn find_common_ancestors(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Vec<SlimCommit>> {
        let states =
            self.walk_from_both_sides(source_commit_id, &HashSet::from([target_commit_id]))?;

        states
            .into_iter()
            .filter(|(_, state)| {
                state.contains(VisitState::RESULT) && !state.contains(VisitState::STALE)
            })
            .map(|(oid, _)| (self.commit_loader)(&oid))
            .collect()
    }

    /// The best common ancestor of two commits, `None` for unrelated histories
    pub fn find_best_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let common_ancestors = self.find_common_ancestors(source_commit_id, target_commit_id)?;
        if common_ancestors.is_empty() {
            tracing::debug!(
                source = %source_commit_id,
                target = %target_commit_id,
                "no common ancestor"
            );
            return Ok(None);
        }

        tracing::debug!(
            candidates = ?common_ancestors.iter().map(|c| c.oid.to_short_oid()).collect::<Vec<_>>(),
            "found common ancestors"
        );

        let mut redundant_ancestors = HashSet::<ObjectId>::new();
        for commit in &common_ancestors {
            if redundant_ancestors.contains(&commit.oid) {
                continue;
            }

            let others = common_ancestors
                .iter()
                .map(|other| &other.oid)
                .filter(|other| **other != commit.oid && !redundant_ancestors.contains(*other))
                .collect::<HashSet<_>>();
            if others.is_empty() {
                continue;
            }

            let states = self.walk_from_both_sides(&commit.oid, &others)?;

            if states
                .get(&commit.oid)
                .unwrap_or(&VisitState::NONE)
                .contains(VisitState::VISITED_FROM_TARGET)
            {
                redundant_ancestors.insert(commit.oid.clone());
            }

            for other in others {
                if states
                    .get(other)
                    .unwrap_or(&VisitState::NONE)
                    .contains(VisitState::VISITED_FROM_SOURCE)
                {
                    redundant_ancestors.insert(other.clone());
                }
            }
        }

        let best_common_ancestor = common_ancestors
            .into_iter()
            .filter(|commit| !redundant_ancestors.contains(&commit.oid))
            .max_by_key(|commit| (commit.timestamp, Reverse(commit.oid.clone())))
            .map(|commit| commit.oid);

        tracing::debug!(
            redundant = redundant_ancestors.len(),
            best = ?best_common_ancestor.as_ref().map(ObjectId::to_short_oid),
            "selected best common ancestor"
        );

        Ok(best_common_ancestor)
    }
}

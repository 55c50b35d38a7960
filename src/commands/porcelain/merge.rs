use crate::areas::database::CommitCache;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::merge::conflict::conflict_markers;
use crate::artifacts::merge::resolution::{MergeAction, MergeResolution};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::BTreeSet;

impl Repository {
    /// Merge the commit named by `target` into HEAD
    ///
    /// Nothing is written when the histories are unrelated or when `target`
    /// is already part of HEAD's history. Otherwise the reconciled content
    /// lands in the working directory and, if no path conflicted, a merge
    /// commit with parents `[HEAD, target]` is created.
    pub fn merge(&self, target: &str) -> anyhow::Result<MergeOutcome> {
        if self.refs().read_merge_head()?.is_some() {
            return Err(RepositoryError::MergeInProgress.into());
        }

        {
            let mut index = self.index();
            index.rehydrate()?;
            if !index.is_empty() {
                anyhow::bail!("cannot merge with staged changes; commit them first");
            }
        }

        let head_oid = Revision::Head.resolve(self)?;
        let merge_oid = Revision::try_parse(target)?.resolve(self)?;

        let (base_oid, resolution) = self.resolve_merge(&head_oid, &merge_oid)?;
        if base_oid == merge_oid {
            writeln!(self.writer(), "Already up to date.")?;
            return Ok(MergeOutcome::UpToDate);
        }

        eprintln!(
            "Merging {} into {}",
            merge_oid.to_short_oid(),
            head_oid.to_short_oid()
        );

        self.apply_merge_actions(&resolution)?;
        self.refs().write_merge_head(&merge_oid)?;

        let conflicts = resolution.conflicts();
        if !conflicts.is_empty() {
            for (path, action) in resolution.actions() {
                if let MergeAction::Conflict { theirs, .. } = action {
                    let kind = if theirs.is_some() {
                        "content"
                    } else {
                        "modify/delete"
                    };
                    writeln!(
                        self.writer(),
                        "CONFLICT ({}): Merge conflict in {}",
                        kind,
                        path.display()
                    )?;
                }
            }
            writeln!(
                self.writer(),
                "Automatic merge failed; fix conflicts and then commit the result."
            )?;
            tracing::info!(conflicts = conflicts.len(), "merge stopped on conflicts");

            return Ok(MergeOutcome::ConflictedMerge { conflicts });
        }

        let (commit_id, _) = self.write_commit(
            vec![head_oid, merge_oid],
            resolution.into_merged_files(),
            format!("Merge branch '{}'", target),
        )?;
        self.refs().clear_merge_head()?;

        writeln!(self.writer(), "Merge made by the 'three-way' strategy.")?;
        writeln!(
            self.writer(),
            "[{}] Merge branch '{}'",
            commit_id.to_short_oid(),
            target
        )?;
        tracing::info!(oid = %commit_id, "merge committed");

        Ok(MergeOutcome::CleanMerge { commit: commit_id })
    }

    /// Find the merge base of two commits and reconcile their snapshots
    pub(crate) fn resolve_merge(
        &self,
        head_oid: &ObjectId,
        merge_oid: &ObjectId,
    ) -> anyhow::Result<(ObjectId, MergeResolution)> {
        let commit_cache = CommitCache::new();
        let database = self.database();

        let base_oid = BCAFinder::new(|oid| commit_cache.get_or_load_slim_commit(database, oid))
            .find_best_common_ancestor(head_oid, merge_oid)?
            .ok_or_else(|| RepositoryError::NoCommonAncestor {
                ours: head_oid.to_short_oid(),
                theirs: merge_oid.to_short_oid(),
            })?;
        tracing::debug!(base = %base_oid, ours = %head_oid, theirs = %merge_oid, "merge base");

        let resolution = MergeResolution::resolve(
            &self.commit_files(Some(&base_oid))?,
            &self.commit_files(Some(head_oid))?,
            &self.commit_files(Some(merge_oid))?,
        );

        Ok((base_oid, resolution))
    }

    // Every blob is loaded and every obstruction checked before the first
    // file is touched; removals run before writes.
    fn apply_merge_actions(&self, resolution: &MergeResolution) -> anyhow::Result<()> {
        let mut removals = BTreeSet::new();
        let mut writes = Vec::new();

        for (path, action) in resolution.actions() {
            match action {
                MergeAction::Apply(oid) => {
                    writes.push((path.as_path(), self.database().load_blob(oid)?));
                }
                MergeAction::Delete => {
                    removals.insert(path.as_path());
                }
                MergeAction::Conflict { ours, theirs } => {
                    let ours = self.load_optional_blob(ours.as_ref())?;
                    let theirs = self.load_optional_blob(theirs.as_ref())?;
                    tracing::debug!(path = %path.display(), "writing conflict markers");
                    writes.push((path.as_path(), conflict_markers(&ours, &theirs)));
                }
            }
        }

        let written_paths = writes.iter().map(|(path, _)| *path);
        if let Some(path) = self.workspace().find_obstruction(written_paths, &removals)? {
            return Err(RepositoryError::WorkspaceObstructed(path.display().to_string()).into());
        }

        for path in &removals {
            self.workspace().remove_file(path)?;
        }
        for (path, content) in &writes {
            self.workspace().write_file(path, content)?;
        }

        Ok(())
    }

    fn load_optional_blob(&self, oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match oid {
            Some(oid) => self.database().load_blob(oid),
            None => Ok(Bytes::new()),
        }
    }
}

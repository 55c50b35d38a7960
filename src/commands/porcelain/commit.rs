use crate::areas::repository::Repository;
use crate::artifacts::branch::head_state::HeadState;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    /// Record the staged changes on top of HEAD
    ///
    /// The new snapshot is HEAD's snapshot with every staged entry laid over
    /// it. While a merge is pending the snapshot starts from the merge result
    /// instead and `MERGE_HEAD` becomes the second parent; every path the
    /// merge left conflicted must be staged first.
    ///
    /// The staging index is cleared only after the branch has moved.
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        let mut index = self.index();
        index.rehydrate()?;

        let merge_head = self.refs().read_merge_head()?;
        if index.is_empty() && merge_head.is_none() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let head_oid = self.refs().resolve_current_commit()?;
        let staged = index.snapshot();
        let mut files = match (&head_oid, &merge_head) {
            (Some(head_oid), Some(merge_oid)) => {
                let (_, resolution) = self.resolve_merge(head_oid, merge_oid)?;
                let unresolved = resolution
                    .conflicts()
                    .into_iter()
                    .filter(|path| !staged.contains_key(path))
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>();
                if !unresolved.is_empty() {
                    return Err(RepositoryError::UnresolvedConflicts(unresolved.join(", ")).into());
                }

                resolution.into_merged_files()
            }
            _ => self.commit_files(head_oid.as_ref())?,
        };
        files.extend(staged);

        if files.is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let parents = head_oid.iter().chain(merge_head.iter()).cloned().collect();
        let (commit_id, commit) =
            self.write_commit(parents, files, message.trim().to_string())?;

        index.clear();
        index.write_updates()?;
        if merge_head.is_some() {
            self.refs().clear_merge_head()?;
        }

        self.print_commit_summary(&commit_id, &commit)?;

        Ok(commit_id)
    }

    fn print_commit_summary(&self, commit_id: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let position = match self.refs().read_head()? {
            HeadState::Attached(branch_name) => branch_name.to_string(),
            HeadState::Detached(_) => "detached HEAD".to_string(),
        };
        let root = if commit.parents().is_empty() {
            " (root-commit)"
        } else {
            ""
        };

        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            position,
            root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head_state::HeadState;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, error_kind};

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    minigit branch <new-branch-name>
"#;

impl Repository {
    /// Switch to a branch, or detach HEAD at a commit
    ///
    /// Every path of the target snapshot is written to the working
    /// directory; paths tracked by the previous HEAD but absent from the
    /// target are removed. The staging index is left as it is.
    pub fn checkout(&self, target: &str) -> anyhow::Result<()> {
        if self.refs().read_merge_head()?.is_some() {
            return Err(RepositoryError::MergeInProgress.into());
        }

        let current_head = self.refs().read_head()?;
        let current_oid = self.refs().resolve_current_commit()?;

        let (new_head, target_oid) = self.resolve_checkout_target(target)?;

        let current_files = match &current_oid {
            Some(oid) => Some(self.commit_files(Some(oid))?),
            None => None,
        };
        let target_files = self.commit_files(Some(&target_oid))?;

        let migration = Migration::plan(current_files.as_ref(), &target_files);
        self.workspace().apply_migration(&migration, self.database())?;

        match &new_head {
            HeadState::Attached(branch_name) => self.refs().attach_head(branch_name)?,
            HeadState::Detached(oid) => self.refs().detach_head(oid, self.database())?,
        }
        tracing::info!(from = %current_head, to = %new_head, "HEAD moved");

        self.print_previous_head(&current_head, current_oid.as_ref(), &target_oid)?;
        self.print_detachment_notice(&current_head, &new_head, target);
        self.print_new_head(&current_head, &new_head, &target_oid)?;

        Ok(())
    }

    fn resolve_checkout_target(&self, target: &str) -> anyhow::Result<(HeadState, ObjectId)> {
        if let Ok(branch_name) = BranchName::try_parse(target.to_string())
            && self.refs().branch_exists(&branch_name)
        {
            let oid = self
                .refs()
                .read_branch(&branch_name)?
                .ok_or_else(|| RepositoryError::NoCommits(target.to_string()))?;

            return Ok((HeadState::Attached(branch_name), oid));
        }

        let oid = Revision::try_parse(target)
            .and_then(|revision| revision.resolve(self))
            .map_err(|error| match error_kind(&error) {
                Some(
                    RepositoryError::NotFound { .. }
                    | RepositoryError::InvalidBranchName(_)
                    | RepositoryError::UnknownTarget(_)
                    | RepositoryError::NoCommits(_),
                ) => RepositoryError::UnknownTarget(target.to_string()).into(),
                _ => error,
            })?;

        Ok((HeadState::Detached(oid.clone()), oid))
    }

    fn print_previous_head(
        &self,
        current_head: &HeadState,
        current_oid: Option<&ObjectId>,
        target_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        if let Some(current_oid) = current_oid
            && current_head.is_detached()
            && current_oid != target_oid
        {
            self.print_head_position("Previous HEAD position was", current_oid)?;
        }

        Ok(())
    }

    fn print_detachment_notice(
        &self,
        current_head: &HeadState,
        new_head: &HeadState,
        target: &str,
    ) {
        if !current_head.is_detached() && new_head.is_detached() {
            eprintln!("Note: switching to '{}'.\n{}", target, DETACHMENT_NOTICE);
        }
    }

    fn print_new_head(
        &self,
        current_head: &HeadState,
        new_head: &HeadState,
        target_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        match new_head {
            HeadState::Detached(_) => self.print_head_position("HEAD is now at", target_oid)?,
            HeadState::Attached(branch_name) if new_head == current_head => {
                eprintln!("Already on '{}'", branch_name)
            }
            HeadState::Attached(branch_name) => eprintln!("Switched to branch '{}'", branch_name),
        }

        Ok(())
    }

    fn print_head_position(&self, message: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let commit = self.database().load_commit(oid)?;
        eprintln!("{} {} {}", message, oid.to_short_oid(), commit.short_message());

        Ok(())
    }
}

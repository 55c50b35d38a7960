use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head_state::HeadState;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

impl Repository {
    /// Create a branch at `start_point` (HEAD by default)
    ///
    /// An existing branch is an error unless `force` is set, in which case
    /// the branch is moved.
    pub fn create_branch(
        &self,
        branch_name: &str,
        start_point: Option<&str>,
        force: bool,
    ) -> anyhow::Result<ObjectId> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let source_oid = match start_point {
            Some(start_point) => Revision::try_parse(start_point)?.resolve(self)?,
            None => Revision::Head.resolve(self)?,
        };

        if force {
            self.refs().set_branch(&branch_name, &source_oid)?;
        } else {
            self.refs().create_branch(&branch_name, &source_oid)?;
        }
        tracing::info!(branch = %branch_name, oid = %source_oid, force, "branch created");

        Ok(source_oid)
    }

    /// Print every branch, marking the one HEAD is attached to
    pub fn list_branches(&self) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;

        if let HeadState::Detached(oid) = &head {
            writeln!(
                self.writer(),
                "* {}",
                format!("(HEAD detached at {})", oid.to_short_oid()).green()
            )?;
        }

        for branch_name in self.refs().list_branches()? {
            if head.branch() == Some(&branch_name) {
                writeln!(self.writer(), "* {}", branch_name.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch_name)?;
            }
        }

        Ok(())
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head_state::HeadState;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create the metadata directory with HEAD attached to the unborn `main`
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(
                RepositoryError::AlreadyInitialized(self.git_path().display().to_string()).into(),
            );
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .minigit/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .minigit/refs/heads directory")?;

        self.refs()
            .write_head(&HeadState::Attached(BranchName::default_branch()))
            .context("Failed to create initial HEAD reference")?;

        tracing::info!(path = %self.git_path().display(), "repository initialized");
        writeln!(
            self.writer(),
            "Initialized empty minigit repository in {}",
            self.git_path().display()
        )?;

        Ok(())
    }
}

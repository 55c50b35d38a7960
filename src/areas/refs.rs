//! References: branches, HEAD and MERGE_HEAD
//!
//! References are the only mutable state in the object graph. They are
//! stored as small text files under the repository directory:
//!
//! - `HEAD`: `ref: refs/heads/<name>` when attached, a bare commit ID when detached
//! - `refs/heads/<name>`: the commit a branch points at
//! - `MERGE_HEAD`: the second parent of a merge awaiting its commit
//!
//! Each file is locked for the duration of a single read-modify-write.

use crate::areas::database::Database;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head_state::HeadState;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

pub const HEAD_REF_NAME: &str = "HEAD";
pub const MERGE_HEAD_REF_NAME: &str = "MERGE_HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.minigit`)
    path: Box<Path>,
}

impl Refs {
    pub fn read_head(&self) -> anyhow::Result<HeadState> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        HeadState::try_parse(&content)
    }

    /// Write HEAD without checking that its target exists
    ///
    /// Only `init` needs this, to attach HEAD to a branch with no commits yet.
    pub(crate) fn write_head(&self, head: &HeadState) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), head.to_file_content())?;
        tracing::debug!(%head, "HEAD updated");
        Ok(())
    }

    /// The commit HEAD currently resolves to; `None` before the first commit
    pub fn resolve_current_commit(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            HeadState::Attached(branch_name) => self.read_branch(&branch_name),
            HeadState::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// Attach HEAD to an existing branch
    pub fn attach_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        if !self.branch_exists(branch_name) {
            return Err(RepositoryError::UnknownTarget(branch_name.to_string()).into());
        }

        self.write_head(&HeadState::Attached(branch_name.clone()))
    }

    /// Detach HEAD at an existing commit
    pub fn detach_head(&self, oid: &ObjectId, database: &Database) -> anyhow::Result<()> {
        if !database.contains(oid) || database.parse_object_as_commit(oid)?.is_none() {
            return Err(RepositoryError::UnknownTarget(oid.to_string()).into());
        }

        self.write_head(&HeadState::Detached(oid.clone()))
    }

    /// Move whatever HEAD designates to a new commit
    ///
    /// When attached the branch advances; when detached HEAD itself moves.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        match self.read_head()? {
            HeadState::Attached(branch_name) => self.set_branch(&branch_name, oid),
            HeadState::Detached(_) => self.write_head(&HeadState::Detached(oid.clone())),
        }
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        self.read_ref_file(&self.branch_path(branch_name))
    }

    /// Point a branch at a commit, creating or overwriting it
    pub fn set_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.branch_path(branch_name), format!("{oid}\n"))?;
        tracing::debug!(branch = %branch_name, %oid, "branch updated");
        Ok(())
    }

    /// Create a new branch; fails with `BranchExists` rather than overwrite
    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            return Err(RepositoryError::BranchExists(branch_name.to_string()).into());
        }

        self.set_branch(branch_name, oid)
    }

    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();
        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path)?;
                BranchName::try_parse(relative_path.to_string_lossy().replace('\\', "/"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        branches.sort();
        Ok(branches)
    }

    pub fn read_merge_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_ref_file(&self.merge_head_path())
    }

    pub fn write_merge_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.merge_head_path(), format!("{oid}\n"))
    }

    pub fn clear_merge_head(&self) -> anyhow::Result<()> {
        let merge_head_path = self.merge_head_path();
        if merge_head_path.exists() {
            std::fs::remove_file(&merge_head_path)
                .with_context(|| format!("failed to remove {:?}", merge_head_path))?;
        }

        Ok(())
    }

    fn read_ref_file(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ObjectId::try_parse(content.to_string())?))
        }
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn merge_head_path(&self) -> Box<Path> {
        self.path.join(MERGE_HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    fn branch_path(&self, branch_name: &BranchName) -> Box<Path> {
        self.path
            .join(branch_name.as_ref_path())
            .into_boxed_path()
    }
}

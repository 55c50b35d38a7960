//! Error kinds surfaced by repository operations
//!
//! Operations return `anyhow::Result` and raise one of these kinds when the
//! failure is something a caller may want to branch on. Use
//! `err.downcast_ref::<RepositoryError>()` to recover the kind.
//!
//! A merge conflict is deliberately absent here: it is a normal outcome
//! reported through `MergeOutcome`, not a failure.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("nothing to commit")]
    NothingToCommit,

    #[error("no common ancestor between {ours} and {theirs}")]
    NoCommonAncestor { ours: String, theirs: String },

    #[error("a branch named '{0}' already exists")]
    BranchExists(String),

    #[error("pathspec '{0}' did not match any branch or commit")]
    UnknownTarget(String),

    #[error("invalid branch name: '{0}'")]
    InvalidBranchName(String),

    #[error("not a minigit repository: {0}")]
    NotARepository(String),

    #[error("repository already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("current branch '{0}' does not have any commits yet")]
    NoCommits(String),

    #[error("a merge is already in progress (MERGE_HEAD exists); commit the resolution first")]
    MergeInProgress,

    #[error("untracked working tree content at '{0}' would be overwritten")]
    WorkspaceObstructed(String),

    #[error("cannot commit with unresolved conflicts in: {0}; stage the resolved files first")]
    UnresolvedConflicts(String),

    #[error("corrupt object {oid}: {reason}")]
    Corrupt { oid: String, reason: String },
}

impl RepositoryError {
    pub fn blob_not_found(name: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            kind: "object",
            name: name.into(),
        }
    }

    pub fn commit_not_found(name: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            kind: "commit",
            name: name.into(),
        }
    }

    pub fn branch_not_found(name: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            kind: "branch",
            name: name.into(),
        }
    }
}

/// Extract the typed kind from an `anyhow` error chain, if there is one.
pub fn error_kind(error: &anyhow::Error) -> Option<&RepositoryError> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<RepositoryError>())
}

use crate::artifacts::branch::{DEFAULT_BRANCH, INVALID_BRANCH_NAME_REGEX};
use crate::errors::RepositoryError;
use anyhow::Context;

/// Prefix of branch refs relative to the repository directory
pub const REF_PREFIX: &str = "refs/heads/";

/// A validated branch name, following git's ref-format rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() || name == "HEAD" {
            return Err(RepositoryError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(RepositoryError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    /// Path of the branch ref relative to the repository directory
    pub fn as_ref_path(&self) -> String {
        format!("{REF_PREFIX}{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

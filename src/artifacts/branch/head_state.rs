use crate::artifacts::branch::branch_name::{BranchName, REF_PREFIX};
use crate::artifacts::objects::object_id::ObjectId;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Where HEAD points: at a branch, or directly at a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    Attached(BranchName),
    Detached(ObjectId),
}

impl HeadState {
    pub fn is_detached(&self) -> bool {
        matches!(self, HeadState::Detached(_))
    }

    pub fn branch(&self) -> Option<&BranchName> {
        match self {
            HeadState::Attached(branch_name) => Some(branch_name),
            HeadState::Detached(_) => None,
        }
    }

    /// Parse the content of the HEAD file
    pub fn try_parse(content: &str) -> anyhow::Result<Self> {
        let content = content.trim();

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            let target = &symref_match[1];
            let branch_name = target.strip_prefix(REF_PREFIX).ok_or_else(|| {
                anyhow::anyhow!("HEAD must point into '{REF_PREFIX}', got '{target}'")
            })?;

            Ok(HeadState::Attached(BranchName::try_parse(
                branch_name.to_string(),
            )?))
        } else {
            Ok(HeadState::Detached(ObjectId::try_parse(content.to_string())?))
        }
    }

    /// Content written to the HEAD file
    pub fn to_file_content(&self) -> String {
        match self {
            HeadState::Attached(branch_name) => format!("ref: {}\n", branch_name.as_ref_path()),
            HeadState::Detached(oid) => format!("{oid}\n"),
        }
    }
}

impl std::fmt::Display for HeadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeadState::Attached(branch_name) => write!(f, "attached:{branch_name}"),
            HeadState::Detached(oid) => write!(f, "detached:{oid}"),
        }
    }
}

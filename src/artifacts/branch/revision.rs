use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;

/// A revision expression naming a commit.
///
/// Supports:
/// - `HEAD` and its alias `@`
/// - Branch names: `main`, `feature/login`
/// - Full and abbreviated (4-40 hex characters) object IDs
/// - Parent notation: `<revision>^`
/// - Ancestor notation: `<revision>~<n>`, following first parents only
///
/// A hex-looking name is tried as a branch first and as an object ID second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Head,
    /// A branch name or a (possibly abbreviated) object ID
    Ref(String),
    Parent(Box<Revision>),
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            if resolved_name == "HEAD" {
                return Ok(Revision::Head);
            }

            // validates ref syntax; hex strings are valid branch names too
            let branch_name = BranchName::try_parse(resolved_name.to_string())?;
            Ok(Revision::Ref(branch_name.to_string()))
        }
    }

    /// Resolve to a commit ID
    ///
    /// Fails with `NoCommits` when HEAD's branch is unborn and with
    /// `UnknownTarget` when a name matches no branch and no commit, or when
    /// the history is shorter than requested.
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Head => repository.refs().resolve_current_commit()?.ok_or_else(|| {
                let branch = repository
                    .refs()
                    .read_head()
                    .ok()
                    .and_then(|head| head.branch().map(|name| name.to_string()))
                    .unwrap_or_else(|| "HEAD".to_string());
                RepositoryError::NoCommits(branch).into()
            }),
            Revision::Ref(name) => {
                let branch_name = BranchName::try_parse(name.clone())?;
                if repository.refs().branch_exists(&branch_name) {
                    return repository
                        .refs()
                        .read_branch(&branch_name)?
                        .ok_or_else(|| RepositoryError::NoCommits(name.clone()).into());
                }

                if ObjectId::looks_like_oid(name) {
                    Self::resolve_oid(name, repository)
                } else {
                    Err(RepositoryError::UnknownTarget(name.clone()).into())
                }
            }
            Revision::Parent(base_revision) => {
                let oid = base_revision.resolve(repository)?;
                Self::resolve_commit_parent(&oid, repository)?
                    .ok_or_else(|| RepositoryError::UnknownTarget(self.to_string()).into())
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(&oid, repository)?
                        .ok_or_else(|| RepositoryError::UnknownTarget(self.to_string()))?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_commit_parent(
        oid: &ObjectId,
        repository: &Repository,
    ) -> anyhow::Result<Option<ObjectId>> {
        let commit = repository.database().load_commit(oid)?;
        Ok(commit.parent().cloned())
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        if oid_str.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(oid_str.to_string())?;
            if Self::is_commit(&oid, repository) {
                return Ok(oid);
            }

            return Err(RepositoryError::UnknownTarget(oid_str.to_string()).into());
        }

        let commit_matches = repository
            .database()
            .find_objects_by_prefix(oid_str)?
            .into_iter()
            .filter(|oid| Self::is_commit(oid, repository))
            .collect::<Vec<_>>();

        match commit_matches.as_slice() {
            [] => Err(RepositoryError::UnknownTarget(oid_str.to_string()).into()),
            [oid] => Ok(oid.clone()),
            candidates => {
                let mut error_msg = format!(
                    "short object ID {} is ambiguous\nhint: The candidates are:",
                    oid_str
                );
                for oid in candidates {
                    error_msg.push_str(&format!("\nhint:   {} commit", oid.to_short_oid()));
                }
                anyhow::bail!(error_msg)
            }
        }
    }

    fn is_commit(oid: &ObjectId, repository: &Repository) -> bool {
        repository
            .database()
            .get_object_type(oid)
            .map(|object_type| object_type == ObjectType::Commit)
            .unwrap_or(false)
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Head => write!(f, "HEAD"),
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}

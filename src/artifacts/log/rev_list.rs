use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// First-parent history starting at `start`, newest first
#[derive(Clone, new)]
pub struct RevList<'r> {
    database: &'r Database,
    start: Option<ObjectId>,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = RevListIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            database: self.database,
            current_commit_oid: self.start,
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.load_commit(&commit_oid) {
            Ok(commit) => {
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            // the walk stops after reporting the first unreadable commit
            Err(error) => Some(Err(error)),
        }
    }
}

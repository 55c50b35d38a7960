use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, FileMap};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Store a commit over `files` and move HEAD (or its branch) onto it
    ///
    /// The ref only moves once the commit object is on disk.
    pub(crate) fn write_commit(
        &self,
        parents: Vec<ObjectId>,
        files: FileMap,
        message: String,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        let commit = Commit::new(parents, files, message, self.config().commit_timestamp())?;
        let commit_id = self.database().store(&commit)?;

        self.refs().update_head(&commit_id)?;
        tracing::info!(oid = %commit_id, parents = commit.parents().len(), "commit created");

        Ok((commit_id, commit))
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::path::Path;

impl Repository {
    /// Print the blob ID of a file, storing the blob when `write` is set
    pub fn hash_object(&self, object_path: &Path, write: bool) -> anyhow::Result<ObjectId> {
        let content = std::fs::read(object_path)
            .map_err(|_| RepositoryError::NotFound {
                kind: "file",
                name: object_path.display().to_string(),
            })?;
        let blob = Blob::new(content.into());

        let object_id = if write {
            self.database().store(&blob)?
        } else {
            blob.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }
}

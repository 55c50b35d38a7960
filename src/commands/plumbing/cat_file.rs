use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    /// Print an object's content, or its type when `show_type` is set
    ///
    /// `object_id` may be abbreviated as long as it is unambiguous.
    pub fn cat_file(&self, object_id: &str, show_type: bool) -> anyhow::Result<()> {
        let object_id = self.expand_object_id(object_id)?;

        if show_type {
            let object_type = self.database().get_object_type(&object_id)?;
            writeln!(self.writer(), "{}", object_type)?;
            return Ok(());
        }

        let object = self.database().parse_object(&object_id)?;
        write!(self.writer(), "{}", object.display())?;

        Ok(())
    }

    fn expand_object_id(&self, object_id: &str) -> anyhow::Result<ObjectId> {
        if object_id.len() == OBJECT_ID_LENGTH {
            return ObjectId::try_parse(object_id.to_string());
        }

        if !ObjectId::looks_like_oid(object_id) {
            return Err(RepositoryError::blob_not_found(object_id).into());
        }

        match self.database().find_objects_by_prefix(object_id)?.as_slice() {
            [] => Err(RepositoryError::blob_not_found(object_id).into()),
            [oid] => Ok(oid.clone()),
            candidates => anyhow::bail!(
                "short object ID {} is ambiguous ({} candidates)",
                object_id,
                candidates.len()
            ),
        }
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

impl Repository {
    /// Store the content of every file under `paths` and stage it
    ///
    /// Directories are expanded recursively. All paths are resolved before
    /// anything is staged, so a missing path leaves the index untouched.
    pub fn add(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        let files = paths
            .iter()
            .map(|path| {
                let relative_path = self.workspace().relative_path(path)?;
                let root = (!relative_path.as_os_str().is_empty()).then_some(relative_path);
                self.workspace().list_files(root.as_deref())
            })
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten();

        let mut index = self.index();
        index.rehydrate()?;

        for file in files {
            let oid = self.stage_file(&file)?;
            index.stage(file, oid);
        }

        index.write_updates()?;

        Ok(())
    }

    fn stage_file(&self, file: &Path) -> anyhow::Result<ObjectId> {
        let content = self.workspace().read_file(file)?;
        self.database().store_blob(content)
    }
}

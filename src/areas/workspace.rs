use crate::REPOSITORY_DIR;
use crate::areas::database::Database;
use crate::artifacts::checkout::migration::Migration;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [REPOSITORY_DIR];

/// The working directory the repository tracks
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user-supplied path into a path relative to the workspace root
    ///
    /// Relative inputs are taken relative to the root; absolute inputs must
    /// lie inside it. `.` components are dropped and `..` is resolved
    /// lexically, never climbing above the root.
    pub fn relative_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let path = if path.is_absolute() {
            let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
            canonical
                .strip_prefix(&self.path)
                .with_context(|| format!("{} is outside the repository", path.display()))?
                .to_path_buf()
        } else {
            path.to_path_buf()
        };

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => normalized.push(name),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        anyhow::bail!("{} is outside the repository", path.display());
                    }
                }
                Component::RootDir | Component::Prefix(_) => {}
            }
        }

        Ok(normalized)
    }

    /// List tracked-candidate files under `root` (the whole workspace when `None`)
    ///
    /// Paths are relative to the workspace root and sorted. The repository
    /// directory is never listed.
    pub fn list_files(&self, root: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_path = match root {
            Some(root) => self.path.join(root),
            None => self.path.to_path_buf(),
        };

        if !root_path.exists() {
            return Err(RepositoryError::NotFound {
                kind: "path",
                name: root
                    .map(|root| root.display().to_string())
                    .unwrap_or_else(|| ".".to_string()),
            }
            .into());
        }

        let mut files = WalkDir::new(&root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(entry.path()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.path)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);
        if !full_path.is_file() {
            return Err(RepositoryError::NotFound {
                kind: "file",
                name: file_path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    /// Write `content` at `file_path`, replacing whatever is there
    pub fn write_file(&self, file_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = file_path.parent() {
            self.make_directory(parent)?;
        }
        // only an empty directory may give way to a file
        if full_path.is_dir() {
            std::fs::remove_dir(&full_path).map_err(|_| {
                RepositoryError::WorkspaceObstructed(file_path.display().to_string())
            })?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;
        tracing::trace!(path = %file_path.display(), bytes = content.len(), "wrote file");

        Ok(())
    }

    /// Remove a file and any directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
            tracing::trace!(path = %file_path.display(), "removed file");
        }

        self.prune_empty_parents(file_path)
    }

    // Parents are visited innermost first so children go before their parents.
    fn prune_empty_parents(&self, file_path: &Path) -> anyhow::Result<()> {
        for parent in file_path.ancestors().skip(1) {
            if parent.as_os_str().is_empty() {
                break;
            }

            let dir_path = self.path.join(parent);
            let is_empty = match std::fs::read_dir(&dir_path) {
                Ok(mut entries) => entries.next().is_none(),
                Err(_) => false,
            };
            if !is_empty {
                break;
            }

            std::fs::remove_dir(&dir_path)
                .with_context(|| format!("Failed to remove directory: {:?}", parent))?;
        }

        Ok(())
    }

    fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        for ancestor in dir_path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }

            if self.path.join(ancestor).is_file() {
                return Err(
                    RepositoryError::WorkspaceObstructed(ancestor.display().to_string()).into(),
                );
            }
        }

        std::fs::create_dir_all(self.path.join(dir_path))
            .with_context(|| format!("Failed to create directory: {:?}", dir_path))?;

        Ok(())
    }

    /// The first path that writing `writes` would clobber once `removals` are gone
    ///
    /// A written path obstructs when a directory holding other files sits
    /// where the file goes, or when a file sits where one of its parent
    /// directories goes. Paths in `removals` are about to be deleted and
    /// never obstruct.
    pub fn find_obstruction<'p>(
        &self,
        writes: impl IntoIterator<Item = &'p Path>,
        removals: &BTreeSet<&Path>,
    ) -> anyhow::Result<Option<PathBuf>> {
        for file_path in writes {
            if self.path.join(file_path).is_dir() {
                let blocking = self
                    .list_files(Some(file_path))?
                    .into_iter()
                    .find(|child| !removals.contains(child.as_path()));
                if blocking.is_some() {
                    return Ok(blocking);
                }
            }

            let blocking_parent = file_path
                .ancestors()
                .skip(1)
                .filter(|ancestor| !ancestor.as_os_str().is_empty())
                .find(|ancestor| {
                    self.path.join(ancestor).is_file() && !removals.contains(ancestor)
                });
            if let Some(parent) = blocking_parent {
                return Ok(Some(parent.to_path_buf()));
            }
        }

        Ok(None)
    }

    // Deletions run before writes so a path can change from file to directory.
    pub fn apply_migration(
        &self,
        migration: &Migration,
        database: &Database,
    ) -> anyhow::Result<()> {
        let removals = migration
            .deletions()
            .map(PathBuf::as_path)
            .collect::<BTreeSet<_>>();
        let writes = migration.writes().map(|(file_path, _)| file_path.as_path());
        if let Some(path) = self.find_obstruction(writes, &removals)? {
            return Err(RepositoryError::WorkspaceObstructed(path.display().to_string()).into());
        }

        for file_path in migration.deletions() {
            self.remove_file(file_path)?;
        }

        for (file_path, oid) in migration.writes() {
            let content = database.load_blob(oid)?;
            self.write_file(file_path, &content)?;
        }

        Ok(())
    }
}

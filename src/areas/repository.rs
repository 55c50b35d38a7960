use crate::REPOSITORY_DIR;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use crate::config::Config;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Handle over one repository: its working directory and `.minigit` metadata
///
/// Every command is a method on this handle; nothing reaches the on-disk
/// layout except through the areas it owns.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    config: Config,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Build a handle rooted at `path`, creating the directory if needed
    ///
    /// This does not require the repository to be initialized; use
    /// [`Repository::open`] for commands that do.
    pub fn new(
        path: impl AsRef<Path>,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let git_path = path.join(REPOSITORY_DIR);

        let index = Index::new(git_path.join("index").into_boxed_path());
        let database = Database::new(git_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            config,
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Open an existing repository rooted at `path`
    pub fn open(
        path: impl AsRef<Path>,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.join(REPOSITORY_DIR).is_dir() {
            return Err(RepositoryError::NotARepository(path.display().to_string()).into());
        }

        let repository = Self::new(path, writer, config)?;
        if !repository.is_initialized() {
            return Err(RepositoryError::NotARepository(path.display().to_string()).into());
        }

        Ok(repository)
    }

    pub fn is_initialized(&self) -> bool {
        self.refs.head_path().is_file()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The snapshot recorded by a commit; empty when there is no commit yet
    pub fn commit_files(&self, commit_oid: Option<&ObjectId>) -> anyhow::Result<FileMap> {
        match commit_oid {
            Some(oid) => Ok(self.database.load_commit(oid)?.into_files()),
            None => Ok(FileMap::new()),
        }
    }
}

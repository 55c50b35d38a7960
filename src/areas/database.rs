//! Object database (content store)
//!
//! Maps content to a stable identifier and persists each distinct object
//! exactly once. Objects are zlib-compressed on disk and written through a
//! temporary file that is renamed into place, so a reader never observes a
//! half-written object.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Store an object unless an object with the same ID already exists
    ///
    /// Storing identical content twice is a no-op write and yields the same ID.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = ObjectId::digest(&object_content);
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object_content)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    /// Content store `put`: persist raw bytes as a blob
    pub fn store_blob(&self, content: impl Into<Bytes>) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content.into()))
    }

    /// Content store `get`: the raw bytes of a stored blob
    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(blob.into_content()),
            ObjectBox::Commit(_) => Err(RepositoryError::NotFound {
                kind: "blob",
                name: object_id.to_string(),
            }
            .into()),
        }
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    /// Load a commit; `None` if the object exists but is not a commit
    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Load a commit, failing with `NotFound` if there is no such commit
    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        self.parse_object_as_commit(object_id)?
            .ok_or_else(|| RepositoryError::commit_not_found(object_id.as_ref()).into())
    }

    pub fn load_slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        let commit = self.load_commit(object_id)?;

        Ok(SlimCommit {
            oid: object_id.clone(),
            parents: commit.parents().to_vec(),
            timestamp: commit.timestamp(),
        })
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Err(RepositoryError::blob_not_found(object_id.as_ref()).into());
        }

        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader)?;
        let remaining = object_reader.get_ref().len() - object_reader.position() as usize;
        if remaining != size {
            return Err(RepositoryError::Corrupt {
                oid: object_id.to_string(),
                reason: format!("header declares {size} bytes, found {remaining}"),
            }
            .into());
        }

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose ID starts with the given hexadecimal prefix
    ///
    /// Only the fan-out directory named by the first two characters is
    /// scanned; shorter prefixes scan every directory.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let dir_names = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255u8).map(|i| format!("{i:02x}")).collect()
        };

        let mut matches = Vec::new();
        for dir_name in dir_names {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let full_oid = format!("{}{}", dir_name, entry.file_name().to_string_lossy());

                if full_oid.starts_with(&prefix)
                    && let Ok(oid) = ObjectId::try_parse(full_oid)
                {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }
}

/// Memoizes slim commits for the duration of one ancestry search
#[derive(Debug, Default)]
pub struct CommitCache {
    commits: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl CommitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load_slim_commit(
        &self,
        database: &Database,
        object_id: &ObjectId,
    ) -> anyhow::Result<SlimCommit> {
        if let Some(commit) = self.commits.borrow().get(object_id) {
            return Ok(commit.clone());
        }

        let commit = database.load_slim_commit(object_id)?;
        self.commits
            .borrow_mut()
            .insert(object_id.clone(), commit.clone());

        Ok(commit)
    }
}

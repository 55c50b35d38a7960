//! Staging index
//!
//! The index records which blob each path should have in the next commit.
//! It is loaded from disk at the start of an operation, mutated in memory
//! and written back in one go.
//!
//! Entries keep the order they were staged in. Staging a path again moves it
//! to the end with its new blob, so the latest write for a path is the only
//! one kept.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::commit::FileMap;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.minigit/index`)
    path: Box<Path>,
    entries: Vec<IndexEntry>,
    /// Whether the in-memory entries differ from what was loaded
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty index. The trailing checksum is
    /// verified and a mismatch is an error.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let entries_count = Self::parse_header(&mut reader)?;
        for _ in 0..entries_count {
            let entry = IndexEntry::deserialize(&mut reader)?;
            self.store_entry(entry);
        }

        reader.verify()?;
        tracing::debug!(entries = self.entries.len(), "index loaded");

        Ok(())
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<u32> {
        let header_bytes = reader.read_bytes(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(&header_bytes)?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    fn store_entry(&mut self, entry: IndexEntry) {
        self.entries.retain(|existing| existing.name != entry.name);
        self.entries.push(entry);
    }

    /// Stage `oid` as the content of `path`, superseding any earlier entry
    pub fn stage(&mut self, path: PathBuf, oid: ObjectId) {
        tracing::debug!(path = %path.display(), %oid, "staged");
        self.store_entry(IndexEntry::new(path, oid));
        self.changed = true;
    }

    /// The staged mapping, one blob per path
    pub fn snapshot(&self) -> FileMap {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.oid.clone()))
            .collect()
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.changed = true;
        }
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.name == path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Persist the index if anything changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let header = IndexHeader::new(
            String::from(SIGNATURE),
            VERSION,
            self.entries.len() as u32,
        );
        writer.write(&header.serialize()?)?;

        for entry in &self.entries {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;
        tracing::debug!(entries = self.entries.len(), "index written");

        Ok(())
    }
}

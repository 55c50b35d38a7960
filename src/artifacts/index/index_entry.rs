//! Index entry representation
//!
//! Each entry pairs a repository-relative path with the blob staged for it.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Maximum path length supported in index entries
pub const MAX_PATH_SIZE: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// File path relative to repository root
    pub name: PathBuf,
    pub oid: ObjectId,
}

impl IndexEntry {
    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        let entry_name = self
            .name
            .to_str()
            .with_context(|| format!("path is not valid UTF-8: {}", self.name.display()))?;
        if entry_name.len() > MAX_PATH_SIZE {
            anyhow::bail!("path too long for the index: {}", entry_name);
        }

        let mut bytes = Vec::new();
        self.oid.write_h40_to(&mut bytes)?;
        bytes.write_u16::<NetworkEndian>(entry_name.len() as u16)?;
        bytes.write_all(entry_name.as_bytes())?;

        Ok(Bytes::from(bytes))
    }

    pub fn deserialize(reader: &mut impl Read) -> anyhow::Result<Self> {
        let oid = ObjectId::read_h40_from(reader)?;
        let name_length = reader.read_u16::<NetworkEndian>()? as usize;

        let mut name = vec![0; name_length];
        reader
            .read_exact(&mut name)
            .context("Unexpected end-of-file while reading index entry")?;
        let name = String::from_utf8(name).context("Invalid path in index entry")?;

        Ok(IndexEntry {
            name: PathBuf::from(name),
            oid,
        })
    }
}

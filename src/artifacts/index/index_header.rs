use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use anyhow::anyhow;
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub marker: String,
    pub version: u32,
    pub entries_count: u32,
}

impl IndexHeader {
    pub fn empty() -> Self {
        IndexHeader::new(String::from(SIGNATURE), VERSION, 0)
    }

    pub fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<NetworkEndian>(self.version)?;
        bytes.write_u32::<NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(bytes))
    }

    pub fn deserialize(bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(anyhow!("Invalid header size"));
        }

        let marker = String::from_utf8(bytes[0..4].to_vec())
            .map_err(|_| anyhow!("Invalid marker in index header"))?;
        let version = NetworkEndian::read_u32(&bytes[4..8]);
        let entries_count = NetworkEndian::read_u32(&bytes[8..12]);

        Ok(IndexHeader {
            marker,
            version,
            entries_count,
        })
    }
}

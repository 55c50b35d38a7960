//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They identify
//! every stored object, blob or commit alike, and are derived purely from the
//! object's framed content.
//!
//! ## Storage
//!
//! Objects are stored in `.minigit/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_RAW_LENGTH, SHORT_OBJECT_ID_LENGTH};
use sha1::{Digest, Sha1};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a full 40-character hexadecimal object ID
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash arbitrary bytes into an object ID
    pub fn digest(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Whether `candidate` is shaped like a (possibly abbreviated) object ID
    pub fn looks_like_oid(candidate: &str) -> bool {
        (4..=OBJECT_ID_LENGTH).contains(&candidate.len())
            && candidate.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Write the object ID in its raw 20-byte form
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let hex40 = self.as_ref();

        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex40[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an object ID from its raw 20-byte form
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];
        reader.read_exact(&mut raw)?;

        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect();
        Self::try_parse(hex40)
    }

    /// Relative storage path, split as `XX/YYYY...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_oid(&self) -> String {
        self.0[..SHORT_OBJECT_ID_LENGTH].to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub trait Packable {
    /// The framed form `<type> <size>\0<body>` that is hashed and stored
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Rebuild the object from its body; the header has already been consumed
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Human-readable rendering used by `cat-file`
    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        Ok(ObjectId::digest(&content))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// Prefix `body` with the shared object header
pub fn frame(object_type: ObjectType, body: &[u8]) -> Result<Bytes> {
    let mut framed = Vec::with_capacity(body.len() + 16);
    write!(framed, "{} {}\0", object_type.as_str(), body.len())?;
    framed.write_all(body)?;

    Ok(Bytes::from(framed))
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(blob) => blob.object_type(),
            ObjectBox::Commit(commit) => commit.object_type(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}

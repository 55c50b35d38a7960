use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::anyhow;
use bytes::Bytes;
use file_guard::FileGuard;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};
use std::ops::DerefMut;

/// Locked index file that hashes everything read from or written to it
#[derive(Debug)]
pub struct Checksum<'f> {
    file: FileGuard<&'f mut std::fs::File>,
    digest: Sha1,
}

impl<'f> Checksum<'f> {
    pub fn new(file: FileGuard<&'f mut std::fs::File>) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }

    pub fn read_bytes(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.file
            .deref_mut()
            .read_exact(&mut buffer)
            .map_err(|_| anyhow!("Unexpected end-of-file while reading index"))?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.deref_mut().write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.file
            .deref_mut()
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to index file"))?;
        self.file.deref_mut().sync_all()?;

        Ok(())
    }

    pub fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.file
            .deref_mut()
            .read_exact(&mut expected_checksum)
            .map_err(|_| anyhow!("Index file is missing its checksum"))?;

        let actual_checksum = self.digest.clone().finalize();
        if expected_checksum != actual_checksum.as_slice() {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        Ok(())
    }
}

impl Read for Checksum<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read = self.file.deref_mut().read(buf)?;
        self.digest.update(&buf[..read]);
        Ok(read)
    }
}

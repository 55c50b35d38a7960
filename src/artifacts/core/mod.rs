//! Output plumbing shared by the binary and the commands

use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter that feeds command output into a `minus` pager
///
/// Output is buffered in the pager until the command finishes; the caller
/// then hands its clone of the pager to `minus::page_all`. A multi-byte
/// character split across two writes is held back until it is complete.
pub struct PagerWriter {
    pager: Pager,
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            pending: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) -> io::Result<()> {
        self.pager.push_str(text).map_err(io::Error::other)
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let pending = std::mem::take(&mut self.pending);
        match std::str::from_utf8(&pending) {
            Ok(text) => self.push(text)?,
            // incomplete sequence at the end: keep it for the next write
            Err(error) if error.error_len().is_none() => {
                let (complete, rest) = pending.split_at(error.valid_up_to());
                self.push(&String::from_utf8_lossy(complete))?;
                self.pending = rest.to_vec();
            }
            Err(_) => self.push(&String::from_utf8_lossy(&pending))?,
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.push(&String::from_utf8_lossy(&pending))?;
        }

        Ok(())
    }
}

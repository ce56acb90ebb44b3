//! Writes bytes to the target file as-is

use super::ByteSink;
use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Uncompressed file sink
pub struct PlainFileSink {
    file: BufWriter<File>,
}

impl PlainFileSink {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(PlainFileSink {
            file: BufWriter::with_capacity(64 * 1024, file), // 64KB buffer
        })
    }
}

impl ByteSink for PlainFileSink {
    fn append(&mut self, data: &[u8]) -> Result<()> {
        self.file.write_all(data)?;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}

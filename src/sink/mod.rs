//! Byte sinks the chunked writer streams finished XML into
//!
//! A sink receives raw XML through [`ByteSink::append`] and is closed exactly
//! once through [`ByteSink::finish`], which consumes it. Compression is an
//! implementation detail of the sink: the writer always accounts raw bytes.

#[cfg(feature = "gzip")]
pub mod gzip;
pub mod plain;

use crate::config::GzipStrategy;
use crate::error::Result;
use std::path::Path;

pub use plain::PlainFileSink;

#[cfg(feature = "gzip")]
pub use gzip::{GzipSink, IncrementalGzip, SpooledGzip};

/// Destination for raw sitemap bytes
pub trait ByteSink: Send {
    /// Queue bytes for the target
    fn append(&mut self, data: &[u8]) -> Result<()>;

    /// Flush everything and close the target
    fn finish(self: Box<Self>) -> Result<()>;
}

/// Output encoding of a sitemap file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip { strategy: GzipStrategy, level: u32 },
}

/// Open the sink for `path`, choosing the gzip strategy once, here.
pub fn open_sink(path: &Path, compression: Compression) -> Result<Box<dyn ByteSink>> {
    match compression {
        Compression::None => Ok(Box::new(PlainFileSink::open(path)?)),
        Compression::Gzip { strategy, level } => open_gzip_sink(path, strategy, level),
    }
}

#[cfg(feature = "gzip")]
fn open_gzip_sink(path: &Path, strategy: GzipStrategy, level: u32) -> Result<Box<dyn ByteSink>> {
    Ok(Box::new(GzipSink::open(path, strategy, level)?))
}

#[cfg(not(feature = "gzip"))]
fn open_gzip_sink(_path: &Path, _strategy: GzipStrategy, _level: u32) -> Result<Box<dyn ByteSink>> {
    Err(crate::error::SitemapError::CompressionUnavailable)
}

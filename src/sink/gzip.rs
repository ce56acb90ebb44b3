//! Gzip sinks producing exactly one gzip member per file
//!
//! Some sitemap consumers refuse multi-member gzip streams, so neither
//! strategy ever sync-flushes or restarts the encoder: one header, one
//! deflate stream, one trailer.

use super::ByteSink;
use crate::config::GzipStrategy;
use crate::error::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

fn create_target(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    Ok(BufWriter::with_capacity(64 * 1024, file)) // 64KB buffer
}

/// Deflates every appended chunk straight into the target file
pub struct IncrementalGzip {
    encoder: GzEncoder<BufWriter<File>>,
}

impl IncrementalGzip {
    pub fn open<P: AsRef<Path>>(path: P, level: u32) -> Result<Self> {
        let target = create_target(path.as_ref())?;
        Ok(IncrementalGzip {
            encoder: GzEncoder::new(target, Compression::new(level.min(9))),
        })
    }

    fn append(&mut self, data: &[u8]) -> Result<()> {
        self.encoder.write_all(data)?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        let mut target = self.encoder.finish()?;
        target.flush()?;
        Ok(())
    }
}

/// Spools raw bytes into an anonymous temp file and compresses the whole
/// spool into the target on finish
pub struct SpooledGzip {
    spool: File,
    target: BufWriter<File>,
    level: u32,
}

impl SpooledGzip {
    pub fn open<P: AsRef<Path>>(path: P, level: u32) -> Result<Self> {
        // the target is created now so permission problems surface early
        let target = create_target(path.as_ref())?;
        Ok(SpooledGzip {
            spool: tempfile::tempfile()?,
            target,
            level: level.min(9),
        })
    }

    fn append(&mut self, data: &[u8]) -> Result<()> {
        self.spool.write_all(data)?;
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.spool.seek(SeekFrom::Start(0))?;

        let mut encoder = GzEncoder::new(self.target, Compression::new(self.level));
        io::copy(&mut self.spool, &mut encoder)?;
        let mut target = encoder.finish()?;
        target.flush()?;
        Ok(())
    }
}

/// Gzip sink backed by one of the two strategies
pub enum GzipSink {
    Incremental(IncrementalGzip),
    Spooled(SpooledGzip),
}

impl GzipSink {
    pub fn open<P: AsRef<Path>>(path: P, strategy: GzipStrategy, level: u32) -> Result<Self> {
        match strategy.resolve() {
            GzipStrategy::Spooled => Ok(GzipSink::Spooled(SpooledGzip::open(path, level)?)),
            _ => Ok(GzipSink::Incremental(IncrementalGzip::open(path, level)?)),
        }
    }

    pub fn strategy(&self) -> GzipStrategy {
        match self {
            GzipSink::Incremental(_) => GzipStrategy::Incremental,
            GzipSink::Spooled(_) => GzipStrategy::Spooled,
        }
    }
}

impl ByteSink for GzipSink {
    fn append(&mut self, data: &[u8]) -> Result<()> {
        match self {
            GzipSink::Incremental(inner) => inner.append(data),
            GzipSink::Spooled(inner) => inner.append(data),
        }
    }

    fn finish(self: Box<Self>) -> Result<()> {
        match *self {
            GzipSink::Incremental(inner) => inner.finish(),
            GzipSink::Spooled(inner) => inner.finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::tempdir;

    const GZIP_MEMBER_START: [u8; 3] = [0x1f, 0x8b, 0x08];

    /// Decode one member and check nothing follows its trailer
    fn is_single_member(bytes: &[u8]) -> bool {
        let mut decoder = flate2::bufread::GzDecoder::new(bytes);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).is_ok() && decoder.into_inner().is_empty()
    }

    fn write_chunks(path: &Path, strategy: GzipStrategy) -> Result<()> {
        let mut sink: Box<dyn ByteSink> = Box::new(GzipSink::open(path, strategy, 6)?);
        for i in 0..100 {
            sink.append(format!("<url><loc>http://example.com/{i}</loc></url>\n").as_bytes())?;
        }
        sink.finish()
    }

    fn expected_payload() -> String {
        (0..100)
            .map(|i| format!("<url><loc>http://example.com/{i}</loc></url>\n"))
            .collect()
    }

    #[test]
    fn test_strategies_produce_identical_payload() -> Result<()> {
        let dir = tempdir()?;

        for strategy in [GzipStrategy::Incremental, GzipStrategy::Spooled] {
            let path = dir.path().join(format!("{strategy:?}.xml.gz"));
            write_chunks(&path, strategy)?;

            let compressed = std::fs::read(&path)?;
            assert_eq!(&compressed[..3], &GZIP_MEMBER_START);
            assert!(is_single_member(&compressed), "{strategy:?} wrote several members");

            let mut decoded = String::new();
            GzDecoder::new(&compressed[..]).read_to_string(&mut decoded)?;
            assert_eq!(decoded, expected_payload());
        }
        Ok(())
    }

    #[test]
    fn test_auto_resolves_to_incremental() -> Result<()> {
        let dir = tempdir()?;
        let sink = GzipSink::open(dir.path().join("auto.xml.gz"), GzipStrategy::Auto, 6)?;
        assert_eq!(sink.strategy(), GzipStrategy::Incremental);
        Box::new(sink).finish()
    }

    #[test]
    fn test_empty_stream_is_valid_gzip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.xml.gz");
        Box::new(GzipSink::open(&path, GzipStrategy::Spooled, 6)?).finish()?;

        let mut decoded = Vec::new();
        GzDecoder::new(std::fs::File::open(&path)?).read_to_end(&mut decoded)?;
        assert!(decoded.is_empty());
        Ok(())
    }
}

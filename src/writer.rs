//! Chunked, size-bounded streaming writer
//!
//! Records are serialized into an in-memory buffer and flushed to the open
//! file every `buffer_size` records. Before bytes reach a file the writer
//! checks them against the file's record and raw byte budgets and rolls
//! over to a new, indexed file when they would not fit. Every file gets its
//! own XML declaration, root start tag and closing tag, so each one is a
//! complete document on its own.
//!
//! The byte budget always counts raw XML, before compression, and keeps
//! room for the closing root tag so finishing a file never overflows it.

use crate::config::{GzipStrategy, WriterConfig};
use crate::emitter::FragmentEmitter;
use crate::error::{Result, SitemapError};
use crate::path::{derive_path, FileLayout};
use crate::sink::{open_sink, ByteSink, Compression};
use crate::xml_writer::XmlWriter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The file currently being written
struct FileSession {
    path: PathBuf,
    index: usize,
    sink: Box<dyn ByteSink>,
    /// Records already appended to the sink
    records: usize,
    /// Raw bytes already appended to the sink
    bytes_written: u64,
}

/// Streaming writer that splits output over as many files as the limits
/// require.
///
/// The sitemap flavor is decided by the [`FragmentEmitter`]; see
/// [`Sitemap`](crate::Sitemap) and [`Index`](crate::Index) for the two
/// bundled ones.
pub struct ChunkedWriter<E: FragmentEmitter> {
    base_path: PathBuf,
    config: WriterConfig,
    emitter: E,
    /// Serialized records not yet handed to the sink
    buffer: XmlWriter,
    /// End offset in `buffer` of every pending record
    pending: Vec<usize>,
    session: Option<FileSession>,
    file_count: usize,
    written_paths: Vec<PathBuf>,
}

impl<E: FragmentEmitter> ChunkedWriter<E> {
    /// Create a writer for `path` using `emitter` for the records.
    ///
    /// Nothing is written until the first record arrives. Fails if the
    /// directory of `path` does not exist.
    pub fn with_emitter<P: AsRef<Path>>(path: P, emitter: E) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        let dir = match base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            return Err(SitemapError::MissingDirectory(dir.to_path_buf()));
        }

        let config = WriterConfig::default();
        Ok(ChunkedWriter {
            base_path,
            buffer: XmlWriter::nested(config.use_indent, 1),
            config,
            emitter,
            pending: Vec::new(),
            session: None,
            file_count: 0,
            written_paths: Vec::new(),
        })
    }

    /// Replace all settings at once
    pub fn with_config(mut self, config: WriterConfig) -> Result<Self> {
        config.validate()?;
        if self.file_count > 0 && config.use_gzip != self.config.use_gzip {
            return Err(SitemapError::GzipLocked);
        }
        self.buffer.set_indent(config.use_indent);
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Maximum number of records in a single file. Default is 50000.
    pub fn set_max_records(&mut self, max: usize) -> Result<()> {
        if max == 0 {
            return Err(SitemapError::InvalidConfig(
                "max_records_per_file must be at least 1".to_string(),
            ));
        }
        self.config.max_records_per_file = max;
        Ok(())
    }

    /// Maximum number of raw bytes in a single file. Default is 10 MiB.
    pub fn set_max_bytes(&mut self, max: u64) {
        self.config.max_bytes_per_file = max;
    }

    /// Number of records kept in memory before writing to the file.
    /// Default is 10.
    pub fn set_buffer_size(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(SitemapError::InvalidConfig(
                "buffer_size must be at least 1".to_string(),
            ));
        }
        self.config.buffer_size = size;
        Ok(())
    }

    pub fn set_use_indent(&mut self, indent: bool) {
        self.config.use_indent = indent;
        self.buffer.set_indent(indent);
    }

    /// Whether files are gzipped. Cannot change once records were written.
    pub fn set_use_gzip(&mut self, gzip: bool) -> Result<()> {
        if gzip && !cfg!(feature = "gzip") {
            return Err(SitemapError::CompressionUnavailable);
        }
        if self.file_count > 0 && gzip != self.config.use_gzip {
            return Err(SitemapError::GzipLocked);
        }
        self.config.use_gzip = gzip;
        Ok(())
    }

    pub fn set_gzip_strategy(&mut self, strategy: GzipStrategy) {
        self.config.gzip_strategy = strategy;
    }

    pub fn set_layout(&mut self, layout: FileLayout) {
        self.config.layout = layout;
    }

    /// Add one record.
    ///
    /// Invalid records are rejected before anything changes. Otherwise the
    /// record is buffered, and the buffer is flushed once it holds
    /// `buffer_size` records.
    pub fn add(&mut self, record: E::Record) -> Result<()> {
        self.emitter.validate(&record)?;

        if self.records_in_current_file() >= self.config.max_records_per_file {
            self.flush()?;
            self.finish_file()?;
        }
        if self.session.is_none() {
            let session = self.open_file()?;
            self.session = Some(session);
        }

        self.emitter.write_record(&mut self.buffer, &record);
        self.pending.push(self.buffer.len());

        if self.pending.len() >= self.config.buffer_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Finish the open file and return every path written in this session
    pub fn write(&mut self) -> Result<&[PathBuf]> {
        self.flush()?;
        self.finish_file()?;
        Ok(&self.written_paths)
    }

    /// Paths of all files created so far, in creation order
    pub fn written_file_paths(&self) -> &[PathBuf] {
        &self.written_paths
    }

    /// Public URLs of the written files: `base_url` followed by each file
    /// name. Used to fill a sitemap index.
    pub fn sitemap_urls(&self, base_url: &str) -> Vec<String> {
        self.written_paths
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| format!("{}{}", base_url, name.to_string_lossy()))
            .collect()
    }

    /// Path the `index`-th file of this writer gets
    pub fn file_path(&self, index: usize) -> PathBuf {
        derive_path(&self.base_path, index, self.config.layout)
    }

    /// Records written to or buffered for the open file
    fn records_in_current_file(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.records) + self.pending.len()
    }

    /// Move buffered records into files, rolling over as the byte budget
    /// requires.
    fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let data = self.buffer.take();
        let ends = std::mem::take(&mut self.pending);
        self.commit(&data, &ends)
    }

    fn commit(&mut self, data: &[u8], ends: &[usize]) -> Result<()> {
        let reserve = self.footer().len() as u64;
        let max_bytes = self.config.max_bytes_per_file;
        let max_records = self.config.max_records_per_file;

        let mut start = 0;
        let mut next = 0;
        while next < ends.len() {
            let session = self.current_session()?;

            // longest run of whole records that still fits into this file
            let mut take = next;
            while take < ends.len()
                && session.records + (take - next) < max_records
                && session.bytes_written + (ends[take] - start) as u64 + reserve <= max_bytes
            {
                take += 1;
            }

            if take == next {
                if session.records == 0 {
                    let needed = session.bytes_written + (ends[next] - start) as u64 + reserve;
                    self.abandon_file();
                    return Err(SitemapError::BudgetTooSmall {
                        needed,
                        limit: max_bytes,
                    });
                }
                debug!(
                    path = %session.path.display(),
                    records = session.records,
                    bytes = session.bytes_written,
                    "sitemap file full, rolling over"
                );
                self.finish_file()?;
                continue;
            }

            let end = ends[take - 1];
            session.sink.append(&data[start..end])?;
            session.bytes_written += (end - start) as u64;
            session.records += take - next;
            debug!(
                path = %session.path.display(),
                records = take - next,
                bytes = end - start,
                "flushed sitemap buffer"
            );

            start = end;
            next = take;
        }
        Ok(())
    }

    fn current_session(&mut self) -> Result<&mut FileSession> {
        let session = match self.session.take() {
            Some(session) => session,
            None => self.open_file()?,
        };
        Ok(self.session.insert(session))
    }

    /// Create the next file and write its header
    fn open_file(&mut self) -> Result<FileSession> {
        let index = self.file_count + 1;
        let path = self.file_path(index);
        prepare_target(&path)?;

        let compression = if self.config.use_gzip {
            Compression::Gzip {
                strategy: self.config.gzip_strategy,
                level: self.config.gzip_level,
            }
        } else {
            Compression::None
        };
        let mut sink = open_sink(&path, compression)?;

        self.file_count = index;
        self.written_paths.push(path.clone());

        let header = self.header();
        sink.append(&header)?;
        debug!(path = %path.display(), index, "opened sitemap file");

        Ok(FileSession {
            path,
            index,
            sink,
            records: 0,
            bytes_written: header.len() as u64,
        })
    }

    /// Close the root element and the sink of the open file
    fn finish_file(&mut self) -> Result<()> {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };

        let footer = self.footer();
        session.sink.append(&footer)?;
        session.bytes_written += footer.len() as u64;
        session.sink.finish()?;

        info!(
            path = %session.path.display(),
            index = session.index,
            records = session.records,
            bytes = session.bytes_written,
            "finished sitemap file"
        );
        Ok(())
    }

    /// Drop buffered records and close the open file so it stays well-formed
    fn abandon_file(&mut self) {
        self.pending.clear();
        self.buffer.take();
        if let Err(err) = self.finish_file() {
            warn!(error = %err, "failed to close sitemap file");
        }
    }

    fn header(&self) -> Vec<u8> {
        let mut xml = XmlWriter::new(self.config.use_indent);
        xml.declaration();
        xml.start_element(self.emitter.root_element());
        self.emitter.write_namespaces(&mut xml);
        xml.close_start_tag();
        xml.ensure_newline();
        xml.into_bytes()
    }

    fn footer(&self) -> Vec<u8> {
        let mut xml = XmlWriter::nested(self.config.use_indent, 1);
        xml.end_element(self.emitter.root_element());
        xml.ensure_newline();
        xml.into_bytes()
    }
}

impl<E: FragmentEmitter> Drop for ChunkedWriter<E> {
    fn drop(&mut self) {
        if let Some(path) = self.session.as_ref().map(|s| s.path.clone()) {
            warn!(
                path = %path.display(),
                "sitemap writer dropped without write(), finishing open file"
            );
            if let Err(err) = self.flush().and_then(|_| self.finish_file()) {
                warn!(error = %err, "failed to finish sitemap file on drop");
            }
        }
    }
}

/// Remove a previous file at `path`, failing if it cannot be replaced
fn prepare_target(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    if metadata.permissions().readonly() {
        return Err(SitemapError::NotWritable(path.to_path_buf()));
    }
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            Err(SitemapError::NotWritable(path.to_path_buf()))
        }
        Err(err) => Err(err.into()),
    }
}

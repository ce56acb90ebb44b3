//! Writer limits and output options

use crate::error::{Result, SitemapError};
use crate::path::FileLayout;

/// Maximum URLs per file allowed by the sitemap protocol
pub const DEFAULT_MAX_RECORDS: usize = 50_000;

/// Maximum uncompressed file size allowed by the sitemap protocol (10 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 10_485_760;

/// Records kept in memory before they are flushed to the file
pub const DEFAULT_BUFFER_SIZE: usize = 10;

/// How gzip output is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GzipStrategy {
    /// Pick the best strategy available in this build
    #[default]
    Auto,
    /// Deflate every chunk as it is appended
    Incremental,
    /// Spool raw bytes to a temp file and compress it on finish
    Spooled,
}

impl GzipStrategy {
    /// Resolve `Auto` into a concrete strategy
    pub fn resolve(self) -> GzipStrategy {
        match self {
            GzipStrategy::Auto => GzipStrategy::Incremental,
            other => other,
        }
    }
}

/// Output settings of a sitemap writer
///
/// # Examples
///
/// ```
/// use sitemapstream::config::WriterConfig;
///
/// let config = WriterConfig::default()
///     .with_max_records(1_000)
///     .with_gzip(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterConfig {
    pub max_records_per_file: usize,
    /// Raw (pre-compression) byte budget per file
    pub max_bytes_per_file: u64,
    pub buffer_size: usize,
    pub use_indent: bool,
    pub use_gzip: bool,
    pub gzip_strategy: GzipStrategy,
    /// Deflate level, 0-9
    pub gzip_level: u32,
    pub layout: FileLayout,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            max_records_per_file: DEFAULT_MAX_RECORDS,
            max_bytes_per_file: DEFAULT_MAX_BYTES,
            buffer_size: DEFAULT_BUFFER_SIZE,
            use_indent: true,
            use_gzip: false,
            gzip_strategy: GzipStrategy::Auto,
            gzip_level: 6,
            layout: FileLayout::Dash,
        }
    }
}

impl WriterConfig {
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records_per_file = max;
        self
    }

    pub fn with_max_bytes(mut self, max: u64) -> Self {
        self.max_bytes_per_file = max;
        self
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn with_indent(mut self, indent: bool) -> Self {
        self.use_indent = indent;
        self
    }

    pub fn with_gzip(mut self, gzip: bool) -> Self {
        self.use_gzip = gzip;
        self
    }

    pub fn with_gzip_strategy(mut self, strategy: GzipStrategy) -> Self {
        self.gzip_strategy = strategy;
        self
    }

    pub fn with_gzip_level(mut self, level: u32) -> Self {
        self.gzip_level = level.min(9);
        self
    }

    pub fn with_layout(mut self, layout: FileLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Reject settings the writer cannot operate with
    pub fn validate(&self) -> Result<()> {
        if self.max_records_per_file == 0 {
            return Err(SitemapError::InvalidConfig(
                "max_records_per_file must be at least 1".to_string(),
            ));
        }
        if self.buffer_size == 0 {
            return Err(SitemapError::InvalidConfig(
                "buffer_size must be at least 1".to_string(),
            ));
        }
        if self.gzip_level > 9 {
            return Err(SitemapError::InvalidConfig(format!(
                "gzip_level must be between 0 and 9, got {}",
                self.gzip_level
            )));
        }
        if self.use_gzip && !cfg!(feature = "gzip") {
            return Err(SitemapError::CompressionUnavailable);
        }
        Ok(())
    }
}

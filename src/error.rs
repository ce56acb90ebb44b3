//! Error types for the sitemapstream library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sitemapstream operations
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Main error type for all sitemap operations
#[derive(Error, Debug)]
pub enum SitemapError {
    /// Location is not an absolute URL
    #[error("The location must be a valid URL. You have specified: {0}")]
    InvalidLocation(String),

    /// Location is longer than the protocol allows
    #[error("The location must be at most {max} characters long, got {length}")]
    LocationTooLong { length: usize, max: usize },

    /// Change frequency outside the protocol's vocabulary
    #[error("Invalid change frequency '{value}'. Valid values are: {valid}")]
    InvalidFrequency { value: String, valid: String },

    /// Priority outside 0.0..=1.0
    #[error("Invalid priority {0}. Valid values range from 0.0 to 1.0")]
    InvalidPriority(f64),

    /// Too many extension items of one kind on a single URL
    #[error("Cannot add more than {limit} '{kind}' items to a single URL")]
    ExtensionLimit { kind: &'static str, limit: usize },

    /// URL carries an extension kind the writer was not told about
    #[error("Extension '{0}' is not registered with this sitemap writer")]
    UnregisteredExtension(&'static str),

    /// Output directory does not exist
    #[error("Directory '{}' does not exist", .0.display())]
    MissingDirectory(PathBuf),

    /// Gzip requested but the crate was built without the `gzip` feature
    #[error("Gzip output requested but compression support is not compiled in")]
    CompressionUnavailable,

    /// Compression mode changed after records were written
    #[error("Cannot change the gzip setting once records have been written")]
    GzipLocked,

    /// A single record does not fit into an empty file
    #[error("A single record needs {needed} bytes but the file size limit is {limit} bytes")]
    BudgetTooSmall { needed: u64, limit: u64 },

    /// Rejected writer setting
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Existing output file cannot be replaced
    #[error("File '{}' is not writable", .0.display())]
    NotWritable(PathBuf),

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

//! # sitemapstream
//!
//! A streaming writer for [sitemaps](https://www.sitemaps.org/) and sitemap
//! indexes.
//!
//! ## Features
//!
//! - **Streaming Write**: URLs are serialized into a small in-memory buffer
//!   and flushed to disk every few records
//! - **Automatic Splitting**: output rolls over to `sitemap-2.xml`,
//!   `sitemap-3.xml`, ... when the URL count or raw byte limit is reached
//! - **Always Well-formed**: every file is a complete XML document, even
//!   when a flush is split across files
//! - **Gzip**: optional single-member gzip output, streamed or spooled
//! - **Extensions**: image and alternate-language tags
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sitemapstream::{Frequency, Sitemap, Url};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sitemap = Sitemap::new("sitemap.xml.gz")?;
//! sitemap.set_use_gzip(true)?;
//!
//! for i in 0..200_000 {
//!     sitemap.add_url(
//!         Url::new(format!("https://example.com/item/{i}"))?
//!             .change_frequency(Frequency::Weekly),
//!     )?;
//! }
//!
//! // sitemap.xml.gz, sitemap-2.xml.gz, ... sitemap-4.xml.gz
//! let files = sitemap.write()?;
//! println!("wrote {} files", files.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod emitter;
pub mod error;
pub mod extension;
pub mod index;
pub mod path;
pub mod sink;
pub mod sitemap;
pub mod types;
pub mod writer;
pub mod xml_writer;

pub use config::{GzipStrategy, WriterConfig};
pub use emitter::{FragmentEmitter, SitemapRefEmitter, UrlEmitter};
pub use error::{Result, SitemapError};
pub use extension::{AlternateLink, Extension, ExtensionKind, Image};
pub use index::Index;
pub use path::FileLayout;
pub use sitemap::Sitemap;
pub use types::{Frequency, Priority, SitemapRef, Url};
pub use writer::ChunkedWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_imports() {
        // Test that all public types are accessible
        let _ = std::marker::PhantomData::<SitemapError>;
        let _ = std::marker::PhantomData::<Sitemap>;
        let _ = std::marker::PhantomData::<Index>;
    }

    fn assert_send<T: Send>() {}

    #[test]
    fn test_writers_are_send() {
        assert_send::<Sitemap>();
        assert_send::<Index>();
    }
}

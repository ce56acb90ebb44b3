//! Sitemap index (`<sitemapindex>`) pointing at sitemap files

use crate::emitter::SitemapRefEmitter;
use crate::error::Result;
use crate::types::SitemapRef;
use crate::writer::ChunkedWriter;
use chrono::{DateTime, TimeZone};
use std::path::Path;

/// Streaming sitemap index writer
///
/// # Examples
///
/// ```no_run
/// use sitemapstream::{Index, Sitemap, Url};
///
/// let mut sitemap = Sitemap::new("/var/www/sitemap.xml")?;
/// sitemap.add_url(Url::new("https://example.com/")?)?;
/// sitemap.write()?;
///
/// let mut index = Index::new("/var/www/sitemap_index.xml")?;
/// for location in sitemap.sitemap_urls("https://example.com/") {
///     index.add_sitemap(&location)?;
/// }
/// index.write()?;
/// # Ok::<(), sitemapstream::SitemapError>(())
/// ```
pub type Index = ChunkedWriter<SitemapRefEmitter>;

impl ChunkedWriter<SitemapRefEmitter> {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_emitter(path, SitemapRefEmitter)
    }

    /// Add a sitemap by URL
    pub fn add_sitemap(&mut self, location: &str) -> Result<()> {
        self.add(SitemapRef::new(location)?)
    }

    /// Add a sitemap by URL with its modification time
    pub fn add_sitemap_modified<Tz: TimeZone>(
        &mut self,
        location: &str,
        last_modified: DateTime<Tz>,
    ) -> Result<()> {
        self.add(SitemapRef::new(location)?.last_modified(last_modified))
    }
}

//! Sitemap of page URLs (`<urlset>`)

use crate::emitter::UrlEmitter;
use crate::error::Result;
use crate::extension::ExtensionKind;
use crate::types::Url;
use crate::writer::ChunkedWriter;
use std::path::Path;

/// Streaming sitemap writer
///
/// # Examples
///
/// ```no_run
/// use sitemapstream::{Frequency, Sitemap, Url};
///
/// let mut sitemap = Sitemap::new("/var/www/sitemap.xml")?;
/// sitemap.set_max_records(10_000)?;
///
/// sitemap.add_url(Url::new("https://example.com/")?)?;
/// sitemap.add_url(
///     Url::new("https://example.com/about")?
///         .change_frequency(Frequency::Monthly)
///         .priority(0.3)?,
/// )?;
///
/// sitemap.write()?;
/// let urls = sitemap.sitemap_urls("https://example.com/");
/// # Ok::<(), sitemapstream::SitemapError>(())
/// ```
pub type Sitemap = ChunkedWriter<UrlEmitter>;

impl ChunkedWriter<UrlEmitter> {
    /// Sitemap without extension tags
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_emitter(path, UrlEmitter::new())
    }

    /// Sitemap whose URLs may carry items of the given extension kinds
    pub fn with_extensions<P, I>(path: P, kinds: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = ExtensionKind>,
    {
        Self::with_emitter(path, UrlEmitter::with_extensions(kinds))
    }

    pub fn add_url(&mut self, url: Url) -> Result<()> {
        self.add(url)
    }
}

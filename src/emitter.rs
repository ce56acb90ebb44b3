//! XML fragments for one record, independent of file chunking

use crate::error::{Result, SitemapError};
use crate::extension::ExtensionKind;
use crate::types::{format_w3c, SitemapRef, Url};
use crate::xml_writer::XmlWriter;
use indexmap::IndexSet;

/// Namespace of both `<urlset>` and `<sitemapindex>`
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Serializes records of one sitemap flavor.
///
/// The chunked writer owns the file layout; an emitter only knows its root
/// element, the namespaces to declare on it and how to write one record.
pub trait FragmentEmitter {
    type Record;

    fn root_element(&self) -> &'static str;

    /// Declare namespaces on the open root start tag
    fn write_namespaces(&self, xml: &mut XmlWriter) {
        xml.attribute("xmlns", SITEMAP_NAMESPACE);
    }

    /// Reject records this emitter cannot write. Called before the writer
    /// changes any state for the record.
    fn validate(&self, _record: &Self::Record) -> Result<()> {
        Ok(())
    }

    fn write_record(&self, xml: &mut XmlWriter, record: &Self::Record);
}

/// Writes `<url>` entries of a `<urlset>`
#[derive(Debug, Clone, Default)]
pub struct UrlEmitter {
    extensions: IndexSet<ExtensionKind>,
}

impl UrlEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extensions<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ExtensionKind>,
    {
        UrlEmitter {
            extensions: kinds.into_iter().collect(),
        }
    }

    pub fn is_registered(&self, kind: &ExtensionKind) -> bool {
        self.extensions.contains(kind)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &ExtensionKind> {
        self.extensions.iter()
    }
}

impl FragmentEmitter for UrlEmitter {
    type Record = Url;

    fn root_element(&self) -> &'static str {
        "urlset"
    }

    fn write_namespaces(&self, xml: &mut XmlWriter) {
        xml.attribute("xmlns", SITEMAP_NAMESPACE);
        for kind in &self.extensions {
            kind.write_namespace(xml);
        }
    }

    fn validate(&self, url: &Url) -> Result<()> {
        match url
            .extensions()
            .iter()
            .find(|item| !self.is_registered(item.kind()))
        {
            Some(item) => Err(SitemapError::UnregisteredExtension(item.kind().name)),
            None => Ok(()),
        }
    }

    fn write_record(&self, xml: &mut XmlWriter, url: &Url) {
        xml.start_element("url");
        xml.close_start_tag();

        xml.text_element("loc", url.location());
        if let Some(last_modified) = url.get_last_modified() {
            xml.text_element("lastmod", &format_w3c(last_modified));
        }
        if let Some(frequency) = url.get_change_frequency() {
            xml.text_element("changefreq", frequency.as_str());
        }
        xml.text_element("priority", &url.get_priority().to_string());

        for item in url.extensions() {
            item.write(xml);
        }

        xml.end_element("url");
    }
}

/// Writes `<sitemap>` entries of a `<sitemapindex>`
#[derive(Debug, Clone, Copy, Default)]
pub struct SitemapRefEmitter;

impl FragmentEmitter for SitemapRefEmitter {
    type Record = SitemapRef;

    fn root_element(&self) -> &'static str {
        "sitemapindex"
    }

    fn write_record(&self, xml: &mut XmlWriter, sitemap: &SitemapRef) {
        xml.start_element("sitemap");
        xml.close_start_tag();

        xml.text_element("loc", sitemap.location());
        if let Some(last_modified) = sitemap.get_last_modified() {
            xml.text_element("lastmod", &format_w3c(last_modified));
        }

        xml.end_element("sitemap");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{AlternateLink, Image};
    use crate::types::Frequency;
    use chrono::{TimeZone, Utc};

    fn render<E: FragmentEmitter>(emitter: &E, record: &E::Record) -> String {
        let mut xml = XmlWriter::nested(true, 1);
        emitter.write_record(&mut xml, record);
        String::from_utf8(xml.into_bytes()).unwrap()
    }

    #[test]
    fn test_minimal_url() {
        let url = Url::new("http://example.com/mylink1").unwrap();
        assert_eq!(
            render(&UrlEmitter::new(), &url),
            " <url>\n  <loc>http://example.com/mylink1</loc>\n  <priority>0.5</priority>\n </url>\n"
        );
    }

    #[test]
    fn test_full_url() {
        let url = Url::new("http://example.com/mylink4")
            .unwrap()
            .last_modified(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
            .change_frequency(Frequency::Daily)
            .priority(0.3)
            .unwrap();

        assert_eq!(
            render(&UrlEmitter::new(), &url),
            " <url>\n  <loc>http://example.com/mylink4</loc>\n  \
             <lastmod>2024-01-02T03:04:05+00:00</lastmod>\n  \
             <changefreq>daily</changefreq>\n  <priority>0.3</priority>\n </url>\n"
        );
    }

    #[test]
    fn test_extensions_are_nested_in_url() {
        let emitter = UrlEmitter::with_extensions([AlternateLink::KIND]);
        let url = Url::new("http://example.com/en/mylink2")
            .unwrap()
            .add(AlternateLink::new("ru", "http://example.com/ru/mylink2").unwrap())
            .unwrap();

        emitter.validate(&url).unwrap();
        let xml = render(&emitter, &url);
        assert!(xml.contains(
            "  <xhtml:link rel=\"alternate\" hreflang=\"ru\" href=\"http://example.com/ru/mylink2\"/>\n </url>"
        ));
    }

    #[test]
    fn test_unregistered_extension_rejected() {
        let emitter = UrlEmitter::with_extensions([AlternateLink::KIND]);
        let url = Url::new("http://example.com/gallery")
            .unwrap()
            .add(Image::new("http://example.com/cat.png").unwrap())
            .unwrap();

        assert!(matches!(
            emitter.validate(&url),
            Err(SitemapError::UnregisteredExtension("image"))
        ));
    }

    #[test]
    fn test_namespaces_in_registration_order() {
        let emitter = UrlEmitter::with_extensions([Image::KIND, AlternateLink::KIND]);
        let mut xml = XmlWriter::new(false);
        emitter.write_namespaces(&mut xml);
        assert_eq!(
            String::from_utf8(xml.into_bytes()).unwrap(),
            " xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
             xmlns:image=\"http://www.google.com/schemas/sitemap-image/1.1\" \
             xmlns:xhtml=\"http://www.w3.org/1999/xhtml\""
        );
    }

    #[test]
    fn test_sitemap_ref() {
        let sitemap = SitemapRef::new("http://example.com/sitemap_2.xml")
            .unwrap()
            .last_modified(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());
        assert_eq!(
            render(&SitemapRefEmitter, &sitemap),
            " <sitemap>\n  <loc>http://example.com/sitemap_2.xml</loc>\n  \
             <lastmod>2024-05-06T07:08:09+00:00</lastmod>\n </sitemap>\n"
        );
    }
}

//! Extension tags attached to `<url>` entries
//!
//! An extension kind contributes one namespace declaration to the root
//! element of every file and may appear a bounded number of times per URL.
//! Writers must be told up front which kinds they will see, so the
//! namespaces are declared before the first record is written.

pub mod alternate_link;
pub mod image;

use crate::xml_writer::XmlWriter;
use std::fmt;

pub use alternate_link::AlternateLink;
pub use image::Image;

/// Static description of an extension tag type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensionKind {
    /// Identifier used in error messages and for registration lookups
    pub name: &'static str,
    /// Maximum occurrences per URL, `None` for unlimited
    pub limit: Option<usize>,
    /// Namespace prefix used by the tags, e.g. `image`
    pub prefix: &'static str,
    /// Namespace URI bound to `prefix`
    pub namespace: &'static str,
}

impl ExtensionKind {
    /// Write the `xmlns:prefix="..."` attribute on an open root element
    pub fn write_namespace(&self, xml: &mut XmlWriter) {
        let mut name = String::with_capacity(6 + self.prefix.len());
        name.push_str("xmlns:");
        name.push_str(self.prefix);
        xml.attribute(&name, self.namespace);
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One extension item inside a `<url>` element
pub trait Extension: fmt::Debug + Send + Sync {
    fn kind(&self) -> &'static ExtensionKind;

    /// Write this item's tags, nested inside the open `<url>` element
    fn write(&self, xml: &mut XmlWriter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_namespace() {
        let mut xml = XmlWriter::new(false);
        xml.start_element("urlset");
        Image::KIND.write_namespace(&mut xml);
        AlternateLink::KIND.write_namespace(&mut xml);
        xml.close_start_tag();

        assert_eq!(
            String::from_utf8(xml.into_bytes()).unwrap(),
            "<urlset xmlns:image=\"http://www.google.com/schemas/sitemap-image/1.1\" \
             xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">"
        );
    }
}

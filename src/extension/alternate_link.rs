//! Alternate-language links (`xhtml:link`)
//!
//! Points crawlers to the same page in another language.
//! See <https://support.google.com/webmasters/answer/2620865>

use super::{Extension, ExtensionKind};
use crate::error::Result;
use crate::types::validate_location;
use crate::xml_writer::XmlWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateLink {
    language: String,
    location: String,
}

impl AlternateLink {
    pub const KIND: ExtensionKind = ExtensionKind {
        name: "alternate_link",
        limit: None,
        prefix: "xhtml",
        namespace: "http://www.w3.org/1999/xhtml",
    };

    pub fn new(language: impl Into<String>, location: impl Into<String>) -> Result<Self> {
        let location = location.into();
        validate_location(&location)?;

        Ok(AlternateLink {
            language: language.into(),
            location,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Extension for AlternateLink {
    fn kind(&self) -> &'static ExtensionKind {
        &Self::KIND
    }

    fn write(&self, xml: &mut XmlWriter) {
        xml.start_element("xhtml:link");
        xml.attribute("rel", "alternate");
        xml.attribute("hreflang", &self.language);
        xml.attribute("href", &self.location);
        xml.close_empty();
    }
}

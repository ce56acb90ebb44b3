//! Image extension
//!
//! See <https://support.google.com/webmasters/answer/178636>

use super::{Extension, ExtensionKind};
use crate::error::Result;
use crate::types::validate_location;
use crate::xml_writer::XmlWriter;

/// An image shown on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    location: String,
    caption: Option<String>,
    geo_location: Option<String>,
    title: Option<String>,
    license: Option<String>,
}

impl Image {
    pub const KIND: ExtensionKind = ExtensionKind {
        name: "image",
        limit: Some(1000),
        prefix: "image",
        namespace: "http://www.google.com/schemas/sitemap-image/1.1",
    };

    pub fn new(location: impl Into<String>) -> Result<Self> {
        let location = location.into();
        validate_location(&location)?;

        Ok(Image {
            location,
            caption: None,
            geo_location: None,
            title: None,
            license: None,
        })
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Geographic location of the image, e.g. "Limerick, Ireland"
    pub fn geo_location(mut self, geo_location: impl Into<String>) -> Self {
        self.geo_location = Some(geo_location.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// URL of the image license
    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Extension for Image {
    fn kind(&self) -> &'static ExtensionKind {
        &Self::KIND
    }

    fn write(&self, xml: &mut XmlWriter) {
        xml.start_element("image:image");
        xml.close_start_tag();

        xml.text_element("image:loc", &self.location);
        let optional = [
            ("image:caption", &self.caption),
            ("image:geo_location", &self.geo_location),
            ("image:title", &self.title),
            ("image:license", &self.license),
        ];
        for (tag, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                xml.text_element(tag, value);
            }
        }

        xml.end_element("image:image");
    }
}

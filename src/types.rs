//! Record types written into sitemaps and sitemap indexes

use crate::error::{Result, SitemapError};
use crate::extension::Extension;
use chrono::{DateTime, FixedOffset, TimeZone};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Longest location the sitemap protocol accepts
pub const MAX_LOCATION_LENGTH: usize = 2047;

/// Characters a URI may never contain unescaped
const FORBIDDEN_URI_CHARS: &[char] = &['<', '>', '"', '{', '}', '|', '\\', '^', '`'];

/// Check that `location` is an absolute URL with a host and within
/// [`MAX_LOCATION_LENGTH`] characters.
///
/// The URL parser silently percent-encodes characters that are illegal in a
/// URI, so those are rejected up front; the location is written verbatim.
pub fn validate_location(location: &str) -> Result<()> {
    let length = location.chars().count();
    if length > MAX_LOCATION_LENGTH {
        return Err(SitemapError::LocationTooLong {
            length,
            max: MAX_LOCATION_LENGTH,
        });
    }

    if location
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_URI_CHARS.contains(&c))
    {
        return Err(SitemapError::InvalidLocation(location.to_string()));
    }

    match url::Url::parse(location) {
        Ok(parsed) if parsed.has_host() => Ok(()),
        _ => Err(SitemapError::InvalidLocation(location.to_string())),
    }
}

/// W3C datetime as used by `<lastmod>`
pub(crate) fn format_w3c(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// How often a page is likely to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Frequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl Frequency {
    /// Every frequency, in protocol order
    pub fn all() -> [Frequency; 7] {
        [
            Frequency::Always,
            Frequency::Hourly,
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Yearly,
            Frequency::Never,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Always => "always",
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
            Frequency::Never => "never",
        }
    }
}

impl FromStr for Frequency {
    type Err = SitemapError;

    fn from_str(s: &str) -> Result<Self> {
        Frequency::all()
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| SitemapError::InvalidFrequency {
                value: s.to_string(),
                valid: Frequency::all()
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative priority of a page, 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Priority(f64);

impl Priority {
    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(SitemapError::InvalidPriority(value));
        }
        Ok(Priority(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority(0.5)
    }
}

impl TryFrom<f64> for Priority {
    type Error = SitemapError;

    fn try_from(value: f64) -> Result<Self> {
        Priority::new(value)
    }
}

/// Formats with one decimal place, as written into `<priority>`.
/// Ties round half away from zero.
impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", (self.0 * 10.0).round() / 10.0)
    }
}

/// A single page entry of a sitemap
///
/// # Examples
///
/// ```
/// use sitemapstream::{Frequency, Url};
///
/// let url = Url::new("https://example.com/docs")?
///     .change_frequency(Frequency::Daily)
///     .priority(0.8)?;
/// assert_eq!(url.location(), "https://example.com/docs");
/// # Ok::<(), sitemapstream::SitemapError>(())
/// ```
#[derive(Debug)]
pub struct Url {
    location: String,
    last_modified: Option<DateTime<FixedOffset>>,
    change_frequency: Option<Frequency>,
    priority: Priority,
    extensions: Vec<Box<dyn Extension>>,
    extension_counts: IndexMap<&'static str, usize>,
}

impl Url {
    /// Create a URL entry, validating the location
    pub fn new(location: impl Into<String>) -> Result<Self> {
        let location = location.into();
        validate_location(&location)?;

        Ok(Url {
            location,
            last_modified: None,
            change_frequency: None,
            priority: Priority::default(),
            extensions: Vec::new(),
            extension_counts: IndexMap::new(),
        })
    }

    pub fn last_modified<Tz: TimeZone>(mut self, timestamp: DateTime<Tz>) -> Self {
        self.last_modified = Some(timestamp.fixed_offset());
        self
    }

    pub fn change_frequency(mut self, frequency: Frequency) -> Self {
        self.change_frequency = Some(frequency);
        self
    }

    pub fn priority(mut self, priority: f64) -> Result<Self> {
        self.priority = Priority::new(priority)?;
        Ok(self)
    }

    /// Attach an extension item, enforcing its kind's per-URL limit
    pub fn add<X: Extension + 'static>(self, item: X) -> Result<Self> {
        self.add_boxed(Box::new(item))
    }

    pub fn add_boxed(mut self, item: Box<dyn Extension>) -> Result<Self> {
        let kind = item.kind();
        let count = self.extension_counts.entry(kind.name).or_insert(0);
        if let Some(limit) = kind.limit {
            if *count >= limit {
                return Err(SitemapError::ExtensionLimit {
                    kind: kind.name,
                    limit,
                });
            }
        }

        *count += 1;
        self.extensions.push(item);
        Ok(self)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn get_last_modified(&self) -> Option<&DateTime<FixedOffset>> {
        self.last_modified.as_ref()
    }

    pub fn get_change_frequency(&self) -> Option<Frequency> {
        self.change_frequency
    }

    pub fn get_priority(&self) -> Priority {
        self.priority
    }

    pub fn extensions(&self) -> &[Box<dyn Extension>] {
        &self.extensions
    }
}

/// Reference to a sitemap file, the record type of a sitemap index
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapRef {
    location: String,
    last_modified: Option<DateTime<FixedOffset>>,
}

impl SitemapRef {
    pub fn new(location: impl Into<String>) -> Result<Self> {
        let location = location.into();
        validate_location(&location)?;

        Ok(SitemapRef {
            location,
            last_modified: None,
        })
    }

    pub fn last_modified<Tz: TimeZone>(mut self, timestamp: DateTime<Tz>) -> Self {
        self.last_modified = Some(timestamp.fixed_offset());
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn get_last_modified(&self) -> Option<&DateTime<FixedOffset>> {
        self.last_modified.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{AlternateLink, Image};
    use chrono::Utc;

    #[test]
    fn test_location_validation() {
        assert!(Url::new("http://example.com/mylink1").is_ok());
        assert!(matches!(
            Url::new("notlink"),
            Err(SitemapError::InvalidLocation(_))
        ));
        assert!(matches!(
            Url::new("mailto:someone@example.com"),
            Err(SitemapError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_location_length_validation() {
        let long = format!("http://example.com/{}", "z".repeat(2048));
        assert!(matches!(
            Url::new(long),
            Err(SitemapError::LocationTooLong { max: 2047, .. })
        ));

        let fits = format!("http://example.com/{}", "z".repeat(2047 - 19));
        assert_eq!(fits.len(), MAX_LOCATION_LENGTH);
        assert!(Url::new(fits).is_ok());
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("hourly".parse::<Frequency>().unwrap(), Frequency::Hourly);
        assert_eq!(Frequency::Never.to_string(), "never");

        let err = "invalid".parse::<Frequency>().unwrap_err();
        assert!(err.to_string().contains("always, hourly, daily"));
    }

    #[test]
    fn test_priority_validation() {
        assert!(Url::new("http://example.com/").unwrap().priority(2.0).is_err());
        assert!(Priority::new(-0.1).is_err());
        assert!(Priority::new(f64::NAN).is_err());
        assert_eq!(Priority::new(1.0).unwrap().to_string(), "1.0");
        assert_eq!(Priority::default().to_string(), "0.5");
        assert_eq!(Priority::new(0.3).unwrap().to_string(), "0.3");
    }

    #[test]
    fn test_priority_rounds_half_up() {
        for (value, expected) in [(0.05, "0.1"), (0.15, "0.2"), (0.25, "0.3"), (0.35, "0.4")] {
            assert_eq!(Priority::new(value).unwrap().to_string(), expected, "{value}");
        }
        assert_eq!(Priority::new(0.0).unwrap().to_string(), "0.0");
        assert_eq!(Priority::new(0.24).unwrap().to_string(), "0.2");
    }

    #[test]
    fn test_location_rejects_unescaped_characters() {
        for location in [
            "http://example.com/a b",
            "http://example.com/a b<c",
            "http://example.com/page\t",
            "http://example.com/\"quoted\"",
            "http://example.com/{id}",
            "http://example.com/a|b",
            "http://example.com/a^b",
            "http://example.com/a`b",
            "http://example.com/a\\b",
        ] {
            assert!(
                matches!(Url::new(location), Err(SitemapError::InvalidLocation(_))),
                "{location:?} accepted"
            );
        }
        assert!(SitemapRef::new("http://example.com/site map.xml").is_err());

        // already escaped input is fine
        assert!(Url::new("http://example.com/a%20b?q=%3Cc%3E&x=1").is_ok());
    }

    #[test]
    fn test_extension_limit() {
        let mut url = Url::new("http://example.com/gallery").unwrap();
        for i in 0..Image::KIND.limit.unwrap() {
            url = url
                .add(Image::new(format!("http://example.com/{i}.png")).unwrap())
                .unwrap();
        }
        let err = url
            .add(Image::new("http://example.com/one-too-many.png").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            SitemapError::ExtensionLimit {
                kind: "image",
                limit: 1000
            }
        ));
    }

    #[test]
    fn test_unlimited_extension() {
        let mut url = Url::new("http://example.com/en/page").unwrap();
        for lang in ["en", "ru", "de", "fr"] {
            url = url
                .add(AlternateLink::new(lang, format!("http://example.com/{lang}/page")).unwrap())
                .unwrap();
        }
        assert_eq!(url.extensions().len(), 4);
    }

    #[test]
    fn test_last_modified_keeps_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let url = Url::new("http://example.com/").unwrap().last_modified(ts);
        assert_eq!(
            format_w3c(url.get_last_modified().unwrap()),
            "2024-03-01T12:30:00+00:00"
        );

        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let ts = offset.with_ymd_and_hms(2024, 3, 1, 15, 30, 0).unwrap();
        let sitemap = SitemapRef::new("http://example.com/sitemap.xml")
            .unwrap()
            .last_modified(ts);
        assert_eq!(
            format_w3c(sitemap.get_last_modified().unwrap()),
            "2024-03-01T15:30:00+03:00"
        );
    }
}

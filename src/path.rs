//! Output file naming for split sitemaps

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix treated as a compression wrapper around the real extension
const COMPRESSION_EXTENSION: &str = "gz";

/// How the file index is attached to the base name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FileLayout {
    /// `sitemap-2.xml`
    #[default]
    Dash,
    /// `sitemap_2.xml`
    Legacy,
}

impl FileLayout {
    pub fn separator(&self) -> &'static str {
        match self {
            FileLayout::Dash => "-",
            FileLayout::Legacy => "_",
        }
    }
}

/// Path of the `index`-th file (1-based) of a session writing to `base`.
///
/// The first file keeps `base` verbatim. Later files get the index inserted
/// before the extension; for `name.xml.gz` the index goes before `.xml` so
/// the compression suffix stays outermost.
///
/// # Examples
///
/// ```
/// use sitemapstream::path::{derive_path, FileLayout};
/// use std::path::Path;
///
/// let base = Path::new("/var/www/sitemap.xml.gz");
/// assert_eq!(derive_path(base, 1, FileLayout::Dash), base);
/// assert_eq!(
///     derive_path(base, 2, FileLayout::Dash),
///     Path::new("/var/www/sitemap-2.xml.gz")
/// );
/// ```
pub fn derive_path(base: &Path, index: usize, layout: FileLayout) -> PathBuf {
    if index < 2 {
        return base.to_path_buf();
    }

    let (stem, extension) = split_extension(base);

    let mut name = OsString::from(stem);
    name.push(layout.separator());
    name.push(itoa::Buffer::new().format(index));
    if let Some(extension) = extension {
        name.push(".");
        name.push(extension);
    }

    base.with_file_name(name)
}

/// Split a file name into stem and (possibly compound) extension
fn split_extension(path: &Path) -> (OsString, Option<OsString>) {
    let Some(stem) = path.file_stem() else {
        return (OsString::new(), None);
    };
    let Some(extension) = path.extension() else {
        return (stem.to_os_string(), None);
    };

    if extension == COMPRESSION_EXTENSION {
        let inner = Path::new(stem);
        if let (Some(inner_stem), Some(inner_extension)) = (inner.file_stem(), inner.extension()) {
            let mut compound = inner_extension.to_os_string();
            compound.push(".");
            compound.push(extension);
            return (inner_stem.to_os_string(), Some(compound));
        }
    }

    (stem.to_os_string(), Some(extension.to_os_string()))
}

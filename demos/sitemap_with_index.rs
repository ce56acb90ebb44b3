//! Large sitemap split over several files, referenced from an index

use chrono::Utc;
use sitemapstream::{Index, Sitemap, Url};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BASE_URL: &str = "https://example.com/";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitemapstream=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Sitemap With Index ===\n");

    // Write 120K URLs, 50K per file
    let mut sitemap = Sitemap::new("products.xml")?;
    for i in 1..=120_000 {
        sitemap.add_url(Url::new(format!("{}products/{}", BASE_URL, i))?)?;
    }
    sitemap.write()?;
    println!("   ✓ {} sitemap files", sitemap.written_file_paths().len());

    let mut index = Index::new("sitemap_index.xml")?;
    let now = Utc::now();
    for location in sitemap.sitemap_urls(BASE_URL) {
        index.add_sitemap_modified(&location, now)?;
    }
    index.write()?;
    println!("   ✓ Written sitemap_index.xml");

    Ok(())
}

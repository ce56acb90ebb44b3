//! Gzipped sitemaps split by raw byte size

use sitemapstream::{GzipStrategy, Sitemap, Url, WriterConfig};
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitemapstream=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Gzip Split Demo ===\n");

    for (strategy, name) in [
        (GzipStrategy::Incremental, "incremental.xml.gz"),
        (GzipStrategy::Spooled, "spooled.xml.gz"),
    ] {
        // 1 MiB of raw XML per file, compressed on disk
        let config = WriterConfig::default()
            .with_max_bytes(1024 * 1024)
            .with_buffer_size(100)
            .with_gzip(true)
            .with_gzip_strategy(strategy);

        let mut sitemap = Sitemap::new(name)?.with_config(config)?;
        for i in 1..=30_000 {
            sitemap.add_url(Url::new(format!(
                "https://example.com/archive/{}/entry-{}",
                i / 1000,
                i
            ))?)?;
        }

        println!("{:?}:", strategy);
        for file in sitemap.write()? {
            let size = fs::metadata(file)?.len();
            println!("   ✓ {} ({} bytes compressed)", file.display(), size);
        }
    }

    Ok(())
}

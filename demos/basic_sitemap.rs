//! Basic sitemap writing

use chrono::Utc;
use sitemapstream::{Frequency, Sitemap, Url};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitemapstream=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Basic Sitemap ===\n");

    let mut sitemap = Sitemap::new("basic_sitemap.xml")?;

    sitemap.add_url(
        Url::new("https://example.com/")?
            .last_modified(Utc::now())
            .change_frequency(Frequency::Daily)
            .priority(1.0)?,
    )?;
    for page in ["about", "contact", "blog"] {
        sitemap.add_url(
            Url::new(format!("https://example.com/{}", page))?
                .change_frequency(Frequency::Monthly),
        )?;
    }

    let files = sitemap.write()?;
    for file in files {
        println!("   ✓ Written {}", file.display());
    }

    Ok(())
}

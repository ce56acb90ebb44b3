//! Sitemap with alternate language links and images

use sitemapstream::{AlternateLink, Frequency, Image, Sitemap, Url};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LANGUAGES: [&str; 3] = ["en", "de", "ru"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitemapstream=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Multi-language Sitemap ===\n");

    let mut sitemap =
        Sitemap::with_extensions("multi_language.xml", [AlternateLink::KIND, Image::KIND])?;

    for page in ["", "pricing", "docs"] {
        for language in LANGUAGES {
            let mut url = Url::new(format!("https://example.com/{}/{}", language, page))?
                .change_frequency(Frequency::Weekly);

            // every version lists all versions, itself included
            for alternate in LANGUAGES {
                url = url.add(AlternateLink::new(
                    alternate,
                    format!("https://example.com/{}/{}", alternate, page),
                )?)?;
            }
            if page.is_empty() {
                url = url.add(
                    Image::new("https://example.com/static/logo.png")?
                        .title("Example logo")
                        .caption("Company logo"),
                )?;
            }

            sitemap.add_url(url)?;
        }
    }

    for file in sitemap.write()? {
        println!("   ✓ Written {}", file.display());
    }

    Ok(())
}

// Regenerates the sitemap in the configured public directory.
use std::path::Path;
use anyhow::Context;
use nanoedit::config::Config;
use nanoedit::sitemap::{write_sitemap, DEFAULT_BASE_URL};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let (public_dir, base_url) = match Config::load() {
        Ok(config) => (config.site.public_dir, config.site.base_url),
        Err(e) => {
            tracing::warn!("Using built-in defaults, configuration not loaded: {}", e);
            ("public".to_string(), DEFAULT_BASE_URL.to_string())
        }
    };

    let (path, count) = write_sitemap(Path::new(&public_dir), &base_url)
        .with_context(|| format!("Failed to write sitemap into {}", public_dir))?;

    println!("Sitemap written to {} ({} URLs)", path.display(), count);
    Ok(())
}

use std::fmt::Write;
use std::path::{Path, PathBuf};
use chrono::Utc;
use crate::content::{sitemap_pages, Page};
use crate::render::escape_html;

pub const DEFAULT_BASE_URL: &str = "https://nanoedit.ai";
pub const FILE_NAME: &str = "sitemap.xml";

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

pub fn entries(base_url: &str) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');
    let today = Utc::now().format("%Y-%m-%d").to_string();

    sitemap_pages()
        .into_iter()
        .map(|page| {
            let (changefreq, priority) = page.crawl_hint();
            let lastmod = match page {
                Page::BlogPost(post) => post.published.to_string(),
                _ => today.clone(),
            };
            SitemapEntry {
                loc: format!("{}{}", base_url, page.path()),
                lastmod,
                changefreq,
                priority,
            }
        })
        .collect()
}

pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            escape_html(&entry.loc),
            entry.lastmod,
            entry.changefreq,
            entry.priority
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /editor/task/\n\nSitemap: {}/{}\n",
        base_url.trim_end_matches('/'),
        FILE_NAME
    )
}

/// Writes `sitemap.xml` into `dir`, creating the directory if needed.
pub fn write_sitemap(dir: &Path, base_url: &str) -> std::io::Result<(PathBuf, usize)> {
    std::fs::create_dir_all(dir)?;
    let entries = entries(base_url);
    let path = dir.join(FILE_NAME);
    std::fs::write(&path, render(&entries))?;
    tracing::info!("Wrote {} URLs to {}", entries.len(), path.display());
    Ok((path, entries.len()))
}

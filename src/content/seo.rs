use serde_json::json;
use crate::config::SiteConfig;
use crate::models::{BlogPost, CaseStudy, ContentType, Guide, SeoConfig};
use super::{BLOG_POSTS, CASE_STUDIES, FAQ, HOW_TO_GUIDES, TUTORIALS};

const BASE_KEYWORDS: &[&str] = &["ai image editor", "photo editing", "text to image"];

/// Every route that carries its own SEO record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Page {
    Home,
    Blog,
    BlogPost(&'static BlogPost),
    CaseStudies,
    CaseStudy(&'static CaseStudy),
    Faq,
    Tutorials,
    Tutorial(&'static Guide),
    HowTo,
    HowToGuide(&'static Guide),
    Prompts,
    Gallery,
    Editor,
}

impl Page {
    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::Blog => "/blog".to_string(),
            Page::BlogPost(post) => format!("/blog/{}", post.slug),
            Page::CaseStudies => "/case-studies".to_string(),
            Page::CaseStudy(study) => format!("/case-studies/{}", study.slug),
            Page::Faq => "/faq".to_string(),
            Page::Tutorials => "/tutorials".to_string(),
            Page::Tutorial(guide) => format!("/tutorials/{}", guide.slug),
            Page::HowTo => "/how-to".to_string(),
            Page::HowToGuide(guide) => format!("/how-to/{}", guide.slug),
            Page::Prompts => "/prompts".to_string(),
            Page::Gallery => "/gallery".to_string(),
            Page::Editor => "/editor".to_string(),
        }
    }

    // (changefreq, priority) for the sitemap
    pub fn crawl_hint(&self) -> (&'static str, &'static str) {
        match self {
            Page::Home => ("daily", "1.0"),
            Page::Editor => ("weekly", "0.9"),
            Page::Blog | Page::Gallery | Page::Prompts => ("weekly", "0.8"),
            Page::BlogPost(_) | Page::CaseStudy(_) | Page::Tutorial(_) | Page::HowToGuide(_) => {
                ("monthly", "0.6")
            }
            _ => ("monthly", "0.7"),
        }
    }

    pub fn seo(&self, site: &SiteConfig) -> SeoConfig {
        let canonical_url = format!("{}{}", site.base_url.trim_end_matches('/'), self.path());
        let (title, description, content_type): (String, String, ContentType) =
            match self {
                Page::Home => (
                    format!("{} - Edit Photos with AI Prompts", site.name),
                    "Describe the change, get the photo. Replace backgrounds, relight scenes and restyle images with a single sentence.".into(),
                    ContentType::Product,
                ),
                Page::Blog => (
                    format!("Blog | {}", site.name),
                    "Guides, ideas and product news about prompt-based image editing.".into(),
                    ContentType::Website,
                ),
                Page::BlogPost(post) => (
                    format!("{} | {}", post.title, site.name),
                    post.summary.into(),
                    ContentType::Article,
                ),
                Page::CaseStudies => (
                    format!("Case Studies | {}", site.name),
                    "How teams use AI image editing for catalogs, listings and campaigns.".into(),
                    ContentType::Website,
                ),
                Page::CaseStudy(study) => (
                    format!("{} | {}", study.title, site.name),
                    study.summary.into(),
                    ContentType::Article,
                ),
                Page::Faq => (
                    format!("FAQ | {}", site.name),
                    "Answers about generation times, formats, privacy and failed generations.".into(),
                    ContentType::Website,
                ),
                Page::Tutorials => (
                    format!("Tutorials | {}", site.name),
                    "Step-by-step tutorials for your first edits and advanced reference workflows.".into(),
                    ContentType::Website,
                ),
                Page::Tutorial(guide) | Page::HowToGuide(guide) => (
                    format!("{} | {}", guide.title, site.name),
                    guide.summary.into(),
                    ContentType::Article,
                ),
                Page::HowTo => (
                    format!("How-To Guides | {}", site.name),
                    "Short recipes for common edits: backgrounds, restoration, cleanup.".into(),
                    ContentType::Website,
                ),
                Page::Prompts => (
                    format!("Prompt Templates | {}", site.name),
                    "Copy-ready prompts for backgrounds, lighting, styles and restoration.".into(),
                    ContentType::Website,
                ),
                Page::Gallery => (
                    format!("Gallery | {}", site.name),
                    "Before-and-after examples made with prompt-based editing.".into(),
                    ContentType::Website,
                ),
                Page::Editor => (
                    format!("Editor | {}", site.name),
                    "Submit a prompt and reference images and get your edited photo in seconds.".into(),
                    ContentType::Product,
                ),
            };

        let keywords = BASE_KEYWORDS
            .iter()
            .chain(self.extra_keywords().iter())
            .map(|k| k.to_string())
            .collect();

        let structured_data = self.structured_data(&title, &description, &canonical_url, site);

        SeoConfig {
            title,
            description,
            keywords,
            canonical_url,
            image: site.default_image.clone(),
            content_type,
            structured_data,
        }
    }

    fn extra_keywords(&self) -> &'static [&'static str] {
        match self {
            Page::Home => &["ai photo editor", "image generation"],
            Page::Blog => &["ai editing blog"],
            Page::CaseStudies => &["customer stories"],
            Page::Faq => &["faq"],
            Page::Tutorials => &["tutorial"],
            Page::HowTo => &["how to"],
            Page::Prompts => &["prompt templates", "prompt ideas"],
            Page::Gallery => &["examples"],
            Page::Editor => &["online photo editor"],
            _ => &[],
        }
    }

    fn structured_data(
        &self,
        title: &str,
        description: &str,
        url: &str,
        site: &SiteConfig,
    ) -> Option<serde_json::Value> {
        match self {
            Page::Faq => Some(json!({
                "@context": "https://schema.org",
                "@type": "FAQPage",
                "mainEntity": FAQ.iter().map(|entry| json!({
                    "@type": "Question",
                    "name": entry.question,
                    "acceptedAnswer": { "@type": "Answer", "text": entry.answer },
                })).collect::<Vec<_>>(),
            })),
            Page::BlogPost(post) => Some(json!({
                "@context": "https://schema.org",
                "@type": "BlogPosting",
                "headline": post.title,
                "description": description,
                "datePublished": post.published,
                "author": { "@type": "Organization", "name": post.author },
                "url": url,
                "image": site.default_image,
            })),
            Page::Tutorial(guide) | Page::HowToGuide(guide) => Some(json!({
                "@context": "https://schema.org",
                "@type": "HowTo",
                "name": title,
                "description": description,
                "step": guide.steps.iter().enumerate().map(|(i, step)| json!({
                    "@type": "HowToStep",
                    "position": i + 1,
                    "text": step,
                })).collect::<Vec<_>>(),
            })),
            _ => None,
        }
    }
}

/// Pages listed in the sitemap, index pages first.
pub fn sitemap_pages() -> Vec<Page> {
    let mut pages = vec![
        Page::Home,
        Page::Editor,
        Page::Gallery,
        Page::Prompts,
        Page::Blog,
        Page::CaseStudies,
        Page::Faq,
        Page::Tutorials,
        Page::HowTo,
    ];
    pages.extend(BLOG_POSTS.iter().map(Page::BlogPost));
    pages.extend(CASE_STUDIES.iter().map(Page::CaseStudy));
    pages.extend(TUTORIALS.iter().map(Page::Tutorial));
    pages.extend(HOW_TO_GUIDES.iter().map(Page::HowToGuide));
    pages
}

use serde_json::json;
use crate::models::{ContentType, SeoConfig};
use super::head::{Head, HeadScript, MetaKey};

pub const STRUCTURED_DATA_ID: &str = "structured-data";
const STRUCTURED_DATA_TYPE: &str = "application/ld+json";

/// Creates or updates every SEO element of `head` from `config`.
///
/// Applying the same config twice leaves the head unchanged. The previous
/// structured-data block is always removed before the new one goes in.
pub fn apply_seo(head: &mut Head, config: &SeoConfig) {
    head.set_title(&config.title);

    head.set_meta(MetaKey::name("description"), &config.description);
    if config.keywords.is_empty() {
        head.remove_meta(&MetaKey::name("keywords"));
    } else {
        head.set_meta(MetaKey::name("keywords"), &config.keywords.join(", "));
    }

    head.set_meta(MetaKey::property("og:title"), &config.title);
    head.set_meta(MetaKey::property("og:description"), &config.description);
    head.set_meta(MetaKey::property("og:image"), &config.image);
    head.set_meta(MetaKey::property("og:url"), &config.canonical_url);
    head.set_meta(MetaKey::property("og:type"), config.content_type.as_str());

    head.set_meta(MetaKey::name("twitter:card"), "summary_large_image");
    head.set_meta(MetaKey::name("twitter:title"), &config.title);
    head.set_meta(MetaKey::name("twitter:description"), &config.description);
    head.set_meta(MetaKey::name("twitter:image"), &config.image);

    head.set_link("canonical", &config.canonical_url);

    remove_structured_data(head);
    head.add_script(HeadScript {
        id: STRUCTURED_DATA_ID.to_string(),
        script_type: Some(STRUCTURED_DATA_TYPE.to_string()),
        content: Some(structured_data(config).to_string()),
        ..Default::default()
    });
}

pub fn remove_structured_data(head: &mut Head) -> bool {
    head.remove_script(STRUCTURED_DATA_ID)
}

fn structured_data(config: &SeoConfig) -> serde_json::Value {
    if let Some(data) = &config.structured_data {
        return data.clone();
    }

    let schema_type = match config.content_type {
        ContentType::Website => "WebPage",
        ContentType::Article => "Article",
        ContentType::Product => "SoftwareApplication",
    };

    json!({
        "@context": "https://schema.org",
        "@type": schema_type,
        "name": config.title,
        "description": config.description,
        "url": config.canonical_url,
        "image": config.image,
    })
}

/// Applies SEO configs to a head and skips work when nothing changed.
#[derive(Debug, Default)]
pub struct SeoInjector {
    applied: Option<SeoConfig>,
}

impl SeoInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-applies only when some field differs from the last applied config.
    /// Returns whether the head was touched.
    pub fn sync(&mut self, head: &mut Head, config: &SeoConfig) -> bool {
        if self.applied.as_ref() == Some(config) {
            tracing::trace!("SEO config unchanged for {}", config.canonical_url);
            return false;
        }

        apply_seo(head, config);
        self.applied = Some(config.clone());
        true
    }

    pub fn unmount(&mut self, head: &mut Head) {
        remove_structured_data(head);
        self.applied = None;
    }
}

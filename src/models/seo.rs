#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    Website,
    Article,
    Product,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Website => "website",
            ContentType::Article => "article",
            ContentType::Product => "product",
        }
    }
}

/// Per-page SEO record. Built once per route from static copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeoConfig {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
    pub image: String,
    pub content_type: ContentType,
    pub structured_data: Option<serde_json::Value>,
}

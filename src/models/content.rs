#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    pub id: &'static str,
    pub category: &'static str,
    pub text: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryExample {
    pub id: &'static str,
    pub category: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub image_url: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub published: &'static str,
    pub author: &'static str,
    pub body: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseStudy {
    pub slug: &'static str,
    pub customer: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub results: &'static [&'static str],
    pub body: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

// Tutorials and how-to guides share one shape: an intro and ordered steps
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub steps: &'static [&'static str],
}

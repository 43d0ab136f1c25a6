//! Static marketing copy and the per-route SEO records built from it.

mod blog;
mod pages;
mod prompts;
mod seo;

pub use blog::{find_post, BLOG_POSTS};
pub use pages::{
    find_case_study, find_how_to, find_tutorial, CASE_STUDIES, FAQ, HOW_TO_GUIDES, TUTORIALS,
};
pub use prompts::{prompt_categories, prompts_in, GALLERY, PROMPT_TEMPLATES};
pub use seo::{sitemap_pages, Page};

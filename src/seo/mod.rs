//! Document-head model and the SEO injector that fills it per page.

mod cache;
mod head;
mod injector;

pub use cache::HeadCache;

pub use head::{Head, HeadScript, MetaKey};
pub use injector::{apply_seo, remove_structured_data, SeoInjector, STRUCTURED_DATA_ID};

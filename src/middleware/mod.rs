mod analytics;

pub use analytics::{track_page_views, VisitorId, VISITOR_COOKIE};

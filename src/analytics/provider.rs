use crate::errors::AnalyticsResult;
use crate::seo::HeadScript;

/// One analytics backend.
///
/// `init` runs once at startup and `shutdown` once when the server stops.
/// Reporting calls made outside that window are dropped by the provider.
pub trait AnalyticsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn init(&self) -> AnalyticsResult<()>;

    fn shutdown(&self);

    fn head_scripts(&self) -> Vec<HeadScript>;

    // `visitor` is the stable per-browser id from the visitor cookie
    fn page_view(&self, visitor: &str, path: &str);

    fn event(&self, visitor: &str, name: &str, params: &serde_json::Value);
}

//! Analytics providers and the deduplicating page-view tracker.

mod clarity;
mod dedup;
mod google;
mod provider;
mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use clarity::Clarity;
pub use dedup::{PageViewDeduper, DEFAULT_CAPACITY, DEFAULT_WINDOW};
pub use google::GoogleAnalytics;
pub use provider::AnalyticsProvider;
pub use tracker::PageViewTracker;

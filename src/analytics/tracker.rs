use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use crate::config::AnalyticsConfig;
use crate::seo::HeadScript;
use super::{AnalyticsProvider, Clarity, GoogleAnalytics, PageViewDeduper};

/// Fans page views and events out to every initialised provider.
pub struct PageViewTracker {
    providers: Vec<Box<dyn AnalyticsProvider>>,
    deduper: Mutex<PageViewDeduper>,
}

impl PageViewTracker {
    pub fn new(providers: Vec<Box<dyn AnalyticsProvider>>, deduper: PageViewDeduper) -> Self {
        Self {
            providers,
            deduper: Mutex::new(deduper),
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        let mut providers: Vec<Box<dyn AnalyticsProvider>> = Vec::new();
        if let Some(id) = &config.ga_measurement_id {
            providers.push(Box::new(GoogleAnalytics::new(
                id.clone(),
                config.ga_api_secret.clone(),
            )));
        }
        if let Some(id) = &config.clarity_project_id {
            providers.push(Box::new(Clarity::new(id.clone())));
        }

        let deduper = PageViewDeduper::new(config.dedup_window(), config.dedup_capacity);
        Self::new(providers, deduper)
    }

    // Providers that fail to start are dropped
    pub fn init(&mut self) {
        self.providers.retain(|provider| match provider.init() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Disabling analytics provider {}: {}", provider.name(), e);
                false
            }
        });
        tracing::info!("Analytics ready with {} provider(s)", self.providers.len());
    }

    pub fn shutdown(&self) {
        for provider in &self.providers {
            provider.shutdown();
        }
        self.deduper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn head_scripts(&self) -> Vec<HeadScript> {
        self.providers
            .iter()
            .flat_map(|provider| provider.head_scripts())
            .collect()
    }

    pub fn track(&self, visitor: &str, path: &str) -> bool {
        self.track_at(visitor, path, Instant::now())
    }

    // Dropped when this visitor already reported `path` within the window
    pub fn track_at(&self, visitor: &str, path: &str, now: Instant) -> bool {
        let report = self
            .deduper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .should_report(visitor, path, now);

        if !report {
            tracing::debug!("Suppressed duplicate page view for {} by {}", path, visitor);
            return false;
        }

        for provider in &self.providers {
            provider.page_view(visitor, path);
        }
        true
    }

    pub fn event(&self, visitor: &str, name: &str, params: &serde_json::Value) {
        for provider in &self.providers {
            provider.event(visitor, name, params);
        }
    }
}

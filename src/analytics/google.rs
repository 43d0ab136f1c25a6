use std::sync::atomic::{AtomicBool, Ordering};
use serde_json::json;
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::seo::HeadScript;
use super::AnalyticsProvider;

const NAME: &str = "google-analytics";
const COLLECT_URL: &str = "https://www.google-analytics.com/mp/collect";

// GA4: gtag in the browser, Measurement Protocol hits when a secret is set
pub struct GoogleAnalytics {
    measurement_id: String,
    api_secret: Option<String>,
    http: reqwest::Client,
    active: AtomicBool,
}

impl GoogleAnalytics {
    pub fn new(measurement_id: String, api_secret: Option<String>) -> Self {
        Self {
            measurement_id,
            api_secret,
            http: reqwest::Client::new(),
            active: AtomicBool::new(false),
        }
    }

    // GA groups hits into users by client_id, so it carries the visitor id
    fn collect_body(&self, visitor: &str, name: &str, params: &serde_json::Value) -> serde_json::Value {
        json!({
            "client_id": visitor,
            "events": [{ "name": name, "params": params }],
        })
    }
}

impl AnalyticsProvider for GoogleAnalytics {
    fn name(&self) -> &'static str {
        NAME
    }

    fn init(&self) -> AnalyticsResult<()> {
        if self.measurement_id.trim().is_empty() {
            return Err(AnalyticsError::MissingConfig {
                provider: NAME,
                field: "ga_measurement_id",
            });
        }
        self.active.store(true, Ordering::SeqCst);
        tracing::info!("Google Analytics initialised for {}", self.measurement_id);
        Ok(())
    }

    fn shutdown(&self) {
        self.active.store(false, Ordering::SeqCst);
        tracing::info!("Google Analytics shut down");
    }

    fn head_scripts(&self) -> Vec<HeadScript> {
        vec![
            HeadScript::external(
                "ga4-loader",
                format!(
                    "https://www.googletagmanager.com/gtag/js?id={}",
                    urlencoding::encode(&self.measurement_id)
                ),
            ),
            // Page views are reported by the server, so the tag must not send its own
            HeadScript::inline(
                "ga4-config",
                format!(
                    "window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}\
                     gtag('js',new Date());gtag('config','{}',{{send_page_view:false}});",
                    self.measurement_id
                ),
            ),
        ]
    }

    fn page_view(&self, visitor: &str, path: &str) {
        self.event(visitor, "page_view", &json!({ "page_location": path }));
    }

    fn event(&self, visitor: &str, name: &str, params: &serde_json::Value) {
        if !self.active.load(Ordering::SeqCst) {
            tracing::warn!("{} dropped event {}: not initialised", NAME, name);
            return;
        }

        let Some(api_secret) = self.api_secret.clone() else {
            tracing::debug!("{} event {} {}", NAME, name, params);
            return;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("{} dropped event {}: no runtime", NAME, name);
            return;
        };

        let request = self
            .http
            .post(COLLECT_URL)
            .query(&[
                ("measurement_id", self.measurement_id.as_str()),
                ("api_secret", api_secret.as_str()),
            ])
            .json(&self.collect_body(visitor, name, params));
        let event_name = name.to_string();

        runtime.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::trace!("{} accepted event {}", NAME, event_name);
                }
                Ok(response) => {
                    tracing::warn!("{} rejected event {}: {}", NAME, event_name, response.status());
                }
                Err(e) => tracing::warn!("{} failed to send event {}: {}", NAME, event_name, e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_requires_measurement_id() {
        let provider = GoogleAnalytics::new("  ".into(), None);
        assert!(matches!(
            provider.init(),
            Err(AnalyticsError::MissingConfig { field: "ga_measurement_id", .. })
        ));

        let provider = GoogleAnalytics::new("G-TEST".into(), None);
        assert!(provider.init().is_ok());
    }

    #[test]
    fn test_head_scripts_disable_automatic_page_views() {
        let provider = GoogleAnalytics::new("G-TEST".into(), None);
        let scripts = provider.head_scripts();

        assert_eq!(scripts.len(), 2);
        assert_eq!(
            scripts[0].src.as_deref(),
            Some("https://www.googletagmanager.com/gtag/js?id=G-TEST")
        );
        let config = scripts[1].content.as_deref().unwrap();
        assert!(config.contains("gtag('config','G-TEST',{send_page_view:false})"));
    }

    #[test]
    fn test_collect_body_shape() {
        let provider = GoogleAnalytics::new("G-TEST".into(), Some("secret".into()));
        let body = provider.collect_body("visitor-1", "page_view", &json!({ "page_location": "/faq" }));

        assert_eq!(body["events"][0]["name"], "page_view");
        assert_eq!(body["events"][0]["params"]["page_location"], "/faq");
        assert_eq!(body["client_id"], "visitor-1");
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::seo::HeadScript;
use super::AnalyticsProvider;

const NAME: &str = "microsoft-clarity";

// Clarity collects in the browser; server side is the loader plus logging
pub struct Clarity {
    project_id: String,
    active: AtomicBool,
}

impl Clarity {
    pub fn new(project_id: String) -> Self {
        Self {
            project_id,
            active: AtomicBool::new(false),
        }
    }
}

impl AnalyticsProvider for Clarity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn init(&self) -> AnalyticsResult<()> {
        if self.project_id.trim().is_empty() {
            return Err(AnalyticsError::MissingConfig {
                provider: NAME,
                field: "clarity_project_id",
            });
        }
        self.active.store(true, Ordering::SeqCst);
        tracing::info!("Clarity initialised for project {}", self.project_id);
        Ok(())
    }

    fn shutdown(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn head_scripts(&self) -> Vec<HeadScript> {
        vec![HeadScript::inline(
            "clarity-loader",
            format!(
                "(function(c,l,a,r,i,t,y){{c[a]=c[a]||function(){{(c[a].q=c[a].q||[]).push(arguments)}};\
                 t=l.createElement(r);t.async=1;t.src=\"https://www.clarity.ms/tag/\"+i;\
                 y=l.getElementsByTagName(r)[0];y.parentNode.insertBefore(t,y);\
                 }})(window,document,\"clarity\",\"script\",\"{}\");",
                self.project_id
            ),
        )]
    }

    fn page_view(&self, visitor: &str, path: &str) {
        if self.active.load(Ordering::SeqCst) {
            tracing::debug!("{} page view {} by {}", NAME, path, visitor);
        }
    }

    fn event(&self, visitor: &str, name: &str, params: &serde_json::Value) {
        if self.active.load(Ordering::SeqCst) {
            tracing::debug!("{} event {} by {} {}", NAME, name, visitor, params);
        }
    }
}

use std::sync::{Arc, Mutex};
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::seo::HeadScript;
use super::AnalyticsProvider;

// Writes "<name>:<call>" lines into a shared log
pub struct RecordingProvider {
    name: &'static str,
    fail_init: bool,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingProvider {
    pub fn new(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { name, fail_init: false, log }
    }

    pub fn failing(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { name, fail_init: true, log }
    }

    fn record(&self, line: String) {
        self.log.lock().unwrap().push(line);
    }
}

impl AnalyticsProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn init(&self) -> AnalyticsResult<()> {
        if self.fail_init {
            return Err(AnalyticsError::MissingConfig { provider: self.name, field: "id" });
        }
        Ok(())
    }

    fn shutdown(&self) {
        self.record(format!("{}:shutdown", self.name));
    }

    fn head_scripts(&self) -> Vec<HeadScript> {
        vec![HeadScript::inline(self.name, String::new())]
    }

    fn page_view(&self, _visitor: &str, path: &str) {
        self.record(format!("{}:page_view:{}", self.name, path));
    }

    fn event(&self, _visitor: &str, name: &str, _params: &serde_json::Value) {
        self.record(format!("{}:{}", self.name, name));
    }
}

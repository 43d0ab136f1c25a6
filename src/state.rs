use std::sync::{Arc, Mutex, PoisonError};
use axum::response::Html;
use crate::analytics::PageViewTracker;
use crate::client::{GenerationClient, RetryPolicy};
use crate::config::Config;
use crate::content::Page;
use crate::errors::{AppResult, ClientResult};
use crate::models::SeoConfig;
use crate::notifications::NotificationFeed;
use crate::render::{load_template, render_layout};
use crate::seo::HeadCache;
use crate::services::TaskWatcher;

// Application state that can be shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tracker: Arc<PageViewTracker>,
    pub client: GenerationClient,
    pub watcher: TaskWatcher<GenerationClient>,
    heads: Arc<Mutex<HeadCache>>,
}

impl AppState {
    pub fn new(config: Config, tracker: Arc<PageViewTracker>) -> ClientResult<Self> {
        let client = GenerationClient::new(
            &config.api.base_url,
            config.api.request_timeout(),
            RetryPolicy::from(&config.polling),
        )?;
        let watcher = TaskWatcher::new(
            client.clone(),
            &config.polling,
            NotificationFeed::default(),
        );
        let heads = HeadCache::new(tracker.head_scripts(), config.site.head_cache_capacity);

        Ok(Self {
            config: Arc::new(config),
            tracker,
            client,
            watcher,
            heads: Arc::new(Mutex::new(heads)),
        })
    }

    pub fn feed(&self) -> &NotificationFeed {
        self.watcher.feed()
    }

    pub fn template(&self, name: &str) -> AppResult<String> {
        load_template(&self.config.site.template_dir, name)
    }

    pub fn render_page(&self, page: Page, body: &str) -> AppResult<Html<String>> {
        self.render_with_seo(&page.seo(&self.config.site), body, true)
    }

    pub fn render_with_seo(&self, seo: &SeoConfig, body: &str, indexable: bool) -> AppResult<Html<String>> {
        let layout = self.template("layout.html")?;
        let head = self
            .heads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .render(seo, indexable);
        Ok(Html(render_layout(&layout, &head, body, &self.config.site.name)))
    }
}

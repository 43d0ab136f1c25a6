use serde::Deserialize;
use std::time::Duration;
use crate::client::DEFAULT_POLL_INTERVAL;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub api: ApiConfig,
    pub analytics: AnalyticsConfig,
    pub polling: PollingConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub name: String,
    pub base_url: String,
    pub template_dir: String,
    pub static_dir: String,
    pub public_dir: String,
    pub default_image: String,
    // Pages whose rendered <head> is kept between requests
    pub head_cache_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    // Local backend that forwards to the image provider
    pub base_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    pub ga_measurement_id: Option<String>,
    pub ga_api_secret: Option<String>,
    pub clarity_project_id: Option<String>,
    pub dedup_window_ms: u64,
    pub dedup_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingConfig {
    pub interval_ms: u64,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
    // A task still waiting after this long is given up on
    pub max_poll_ms: u64,
    // Tasks kept in the last-seen cache
    pub cache_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,  // 10MB in bytes
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl PollingConfig {
    // Zero would turn polling into a busy loop
    pub fn interval(&self) -> Duration {
        match self.interval_ms {
            0 => DEFAULT_POLL_INTERVAL,
            ms => Duration::from_millis(ms),
        }
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn max_poll(&self) -> Duration {
        Duration::from_millis(self.max_poll_ms)
    }
}

impl AnalyticsConfig {
    pub fn dedup_window(&self) -> Duration {
        Duration::from_millis(self.dedup_window_ms)
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = Config::load().unwrap();

        assert_eq!(config.polling.interval(), Duration::from_secs(2));
        assert_eq!(config.polling.max_retries, 3);
        assert_eq!(config.polling.max_poll(), Duration::from_secs(600));
        assert!(config.polling.cache_capacity > 0);
        assert_eq!(config.analytics.dedup_window(), Duration::from_millis(1000));
        assert!(config.site.base_url.starts_with("https://"));
    }
}

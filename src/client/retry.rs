use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use crate::config::PollingConfig;
use crate::errors::ClientResult;

// Fixed-delay retry for idempotent fetches
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    // Not counting the first attempt
    pub max_retries: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl From<&PollingConfig> for RetryPolicy {
    fn from(config: &PollingConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: config.retry_delay(),
        }
    }
}

pub async fn retry_fixed<F, Fut, T>(policy: &RetryPolicy, mut operation: F) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!(attempt, "Request succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) if attempt > policy.max_retries => {
                tracing::warn!(attempt, "All retry attempts exhausted: {}", err);
                return Err(err);
            }
            Err(err) => {
                tracing::debug!(attempt, delay_ms = policy.delay.as_millis() as u64, "Retrying after: {}", err);
                sleep(policy.delay).await;
            }
        }
    }
}

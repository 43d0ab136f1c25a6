use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Provider {provider} is missing configuration: {field}")]
    MissingConfig {
        provider: &'static str,
        field: &'static str,
    },
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

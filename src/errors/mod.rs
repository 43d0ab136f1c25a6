// Error types for the site and the generation client.
use thiserror::Error;

pub mod analytics;
pub mod client;
pub mod response;

pub use analytics::{AnalyticsError, AnalyticsResult};
pub use client::{ClientError, ClientResult};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    Template(#[from] std::io::Error),

    #[error("Form error: {0}")]
    Form(String),

    #[error("Generation error: {0}")]
    Client(#[from] ClientError),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;

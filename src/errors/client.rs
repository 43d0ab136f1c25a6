use std::time::Duration;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again";
pub const STILL_WAITING_MESSAGE: &str = "Your image is taking longer than expected, check back later";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend unavailable ({status}): {message}")]
    Unavailable { status: u16, message: String },

    // Shown to users verbatim, so no prefix here
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Task {task_id} failed ({code}): {message}")]
    TaskFailed {
        task_id: String,
        code: String,
        message: String,
    },

    #[error("Task {task_id} still waiting after {waited:?}")]
    PollTimeout { task_id: String, waited: Duration },

    #[error("Invalid response from backend: {0}")]
    Decode(String),
}

impl ClientError {
    // Transport failures and 5xx answers only
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Unavailable { .. })
    }

    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) | ClientError::Unavailable { .. } => {
                NETWORK_ERROR_MESSAGE.to_string()
            }
            ClientError::Backend { message, .. } => message.clone(),
            ClientError::TaskFailed { code, message, .. } => {
                if code.is_empty() {
                    message.clone()
                } else {
                    format!("{} ({})", message, code)
                }
            }
            ClientError::PollTimeout { .. } => STILL_WAITING_MESSAGE.to_string(),
            ClientError::Decode(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

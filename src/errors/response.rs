use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use crate::errors::{AppError, ClientError};

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                format!("Not found: {}", what)
            ).into_response(),

            AppError::Template(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e)
            ).into_response(),

            AppError::Form(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Form error: {}", msg)
            ).into_response(),

            AppError::Client(err) => convert_client_error(err),
        }
    }
}

// Helper function to convert client errors to responses
fn convert_client_error(err: ClientError) -> Response {
    match err {
        // Backend validation errors keep their status and message
        ClientError::Backend { status, message } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST),
            message
        ).into_response(),

        ClientError::TaskFailed { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            err.user_message()
        ).into_response(),

        ClientError::PollTimeout { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            err.user_message()
        ).into_response(),

        // Everything else is the backend being unreachable or confused
        _ => (
            StatusCode::BAD_GATEWAY,
            err.user_message()
        ).into_response(),
    }
}

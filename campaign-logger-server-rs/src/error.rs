use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use campaign_logger_sdk_rs::{prompts, response::build_text};
use thiserror::Error;

/// Faults inside a webhook request. The platform needs a body on every call,
/// so these still answer 200 with an apology the user can see.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("event routing task failed: {0}")]
    Internal(#[from] tokio::task::JoinError),

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        tracing::error!("Error processing event: {}", self);
        (
            StatusCode::OK,
            Json(build_text(prompts::ERROR_MESSAGE, None)),
        )
            .into_response()
    }
}

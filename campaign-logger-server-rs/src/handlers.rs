use crate::config::ServerConfig;
use crate::error::WebhookError;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Json, Response},
};
use campaign_logger_sdk_rs::{EventRouter, OutgoingPayload};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

pub struct AppState {
    pub router: Arc<EventRouter>,
    pub log_body_limit: usize,
}

impl AppState {
    pub fn new(router: EventRouter, config: &ServerConfig) -> Self {
        Self {
            router: Arc::new(router),
            log_body_limit: config.log_body_limit,
        }
    }
}

#[derive(Serialize)]
pub struct AliveResponse {
    pub status: &'static str,
}

pub async fn index() -> impl IntoResponse {
    "Campaign Logger Bot is running"
}

pub async fn health() -> impl IntoResponse {
    "OK"
}

pub async fn alive() -> impl IntoResponse {
    Json(AliveResponse { status: "ok" })
}

/// The chat platform's event endpoint. Always answers 200 with a payload.
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4();
    tracing::info!(request_id = %request_id, bytes = body.len(), "Incoming event");
    tracing::debug!(request_id = %request_id, "Headers: {}", format_headers(&headers));
    tracing::debug!(
        request_id = %request_id,
        "Body (truncated): {}",
        truncate(&String::from_utf8_lossy(&body), state.log_body_limit)
    );

    // Anything that isn't JSON is an unrecognized payload, not a client error.
    let raw = serde_json::from_slice::<Value>(&body).unwrap_or_else(|e| {
        tracing::warn!(request_id = %request_id, "Body is not valid JSON: {}", e);
        Value::Null
    });

    match respond(state.router.clone(), raw).await {
        Ok(json) => {
            tracing::debug!(
                request_id = %request_id,
                "Response: {}",
                truncate(&json.to_string(), state.log_body_limit)
            );
            Json(json).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Routes on the blocking pool so a panic in the core surfaces as a
/// `JoinError` instead of dropping the connection.
async fn respond(router: Arc<EventRouter>, raw: Value) -> Result<Value, WebhookError> {
    let payload: OutgoingPayload = tokio::task::spawn_blocking(move || router.route(&raw)).await?;
    Ok(serde_json::to_value(&payload)?)
}

/// Renders headers as `name: value` pairs for the debug log, hiding credentials.
fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if *name == header::AUTHORIZATION || *name == header::COOKIE {
                "<redacted>"
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            format!("{}: {}", name, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

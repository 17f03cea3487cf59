use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

// ─── GET / ───────────────────────────────────────────────────────

/// Liveness probe.
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Latency Pings API is running. Use the /api endpoint with a POST request.",
    })
}

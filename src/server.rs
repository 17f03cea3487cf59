use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Liveness ────────────────────────────────────────────
        .route("/", get(handlers::status::root))
        // ── Aggregation ─────────────────────────────────────────
        .route("/api", post(handlers::latency::region_stats))
        // ── Provide shared state to all routes above ────────────
        .with_state(state)
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn(timing::timing_middleware))
        // Any origin, method and header; credentials allowed
        .layer(CorsLayer::very_permissive())
}

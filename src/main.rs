use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod dataset;
mod handlers;
mod middleware;
mod server;
mod stats;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Immutable telemetry snapshot, loaded once before the listener binds.
    pub dataset: dataset::Dataset,
}

#[tokio::main]
async fn main() {
    let args = config::Args::parse();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── 1. Load the dataset ──────────────────────────────────────
    let path = args.dataset.display().to_string();
    let dataset = dataset::Dataset::load(&args.dataset).unwrap_or_else(|e| {
        tracing::error!(%path, error = %e, "cannot load dataset");
        std::process::exit(1);
    });
    if dataset.is_empty() {
        tracing::warn!(%path, "dataset is empty, every region will be reported as not found");
    }
    tracing::info!(
        %path,
        samples = dataset.len(),
        regions = dataset.region_count(),
        "dataset loaded"
    );

    // ── 2. Build shared state ────────────────────────────────────
    let state = Arc::new(AppState { dataset });

    // ── 3. Build Axum router ─────────────────────────────────────
    let app = server::create_router(state);

    // ── 4. Bind & serve ──────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(listen = %args.listen, error = %e, "cannot bind");
            std::process::exit(1);
        });

    tracing::info!(listen = %args.listen, "latency-pings listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dataset::{Dataset, TelemetrySample};
use crate::stats;
use crate::AppState;

use super::AppError;

const P95: f64 = 0.95;

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LatencyRequest {
    pub regions: Vec<String>,
    /// Samples strictly above this count as breaches. Negative is allowed.
    pub threshold_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionMetrics {
    pub avg_latency: f64,
    pub p95_latency: f64,
    pub avg_uptime: f64,
    pub breaches: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RegionResult {
    Metrics(RegionMetrics),
    NotFound { error: &'static str },
}

impl RegionResult {
    pub const NOT_FOUND: Self = Self::NotFound {
        error: "Region not found",
    };
}

/// Region → result in first-insertion order. Re-inserting a region
/// replaces its value without moving it.
pub type RegionReport = IndexMap<String, RegionResult>;

// ─── POST /api ───────────────────────────────────────────────────

pub async fn region_stats(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LatencyRequest>, JsonRejection>,
) -> Result<Json<RegionReport>, AppError> {
    let Json(request) = payload?;

    let report = aggregate(&state.dataset, &request);
    tracing::debug!(
        requested = request.regions.len(),
        distinct = report.len(),
        threshold_ms = request.threshold_ms,
        "aggregated region stats"
    );

    Ok(Json(report))
}

// ─── Aggregation ─────────────────────────────────────────────────

/// Compute per-region metrics for every requested region, in input order.
pub fn aggregate(dataset: &Dataset, request: &LatencyRequest) -> RegionReport {
    let mut report = RegionReport::with_capacity(request.regions.len());

    for region in &request.regions {
        let samples = dataset.samples_for_region(region);
        let result = match region_metrics(samples, request.threshold_ms) {
            Some(metrics) => RegionResult::Metrics(metrics),
            None => RegionResult::NOT_FOUND,
        };
        report.insert(region.clone(), result);
    }

    report
}

/// `None` when `samples` is empty.
pub fn region_metrics(samples: &[TelemetrySample], threshold_ms: i64) -> Option<RegionMetrics> {
    if samples.is_empty() {
        return None;
    }

    let latencies: Vec<f64> = samples.iter().map(|s| s.latency_ms).collect();
    let uptimes: Vec<f64> = samples.iter().map(|s| s.uptime_percent).collect();

    let threshold = threshold_ms as f64;
    let breaches = latencies.iter().filter(|&&l| l > threshold).count() as u64;

    Some(RegionMetrics {
        avg_latency: stats::round2(stats::mean(&latencies)),
        p95_latency: stats::round2(stats::percentile(&latencies, P95)),
        avg_uptime: stats::round2(stats::mean(&uptimes)),
        breaches,
    })
}

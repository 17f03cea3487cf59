use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

const RESPONSE_TIME_US: HeaderName = HeaderName::from_static("x-response-time-us");
const SERVER_TIMING: HeaderName = HeaderName::from_static("server-timing");

/// Stamps every response with its handling time, in microseconds as
/// `x-response-time-us` and in milliseconds as a `server-timing` entry.
/// Requests under `/api` also get an access-log line.
pub async fn timing_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let started = Instant::now();
    let mut response = next.run(req).await;
    let elapsed = started.elapsed();
    let elapsed_us = elapsed.as_micros() as u64;

    let headers = response.headers_mut();
    headers.insert(RESPONSE_TIME_US, HeaderValue::from(elapsed_us));
    let server_timing = format!("total;dur={:.3}", elapsed.as_secs_f64() * 1000.0);
    if let Ok(value) = HeaderValue::from_str(&server_timing) {
        headers.insert(SERVER_TIMING, value);
    }

    // `/` is the liveness probe; logging it would drown everything else
    if path.starts_with("/api") {
        tracing::info!(
            %method,
            %path,
            status = response.status().as_u16(),
            elapsed_us,
            "request"
        );
    }

    response
}

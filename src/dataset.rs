use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ─── Domain type ─────────────────────────────────────────────────

/// One row of the telemetry snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TelemetrySample {
    pub region: String,
    pub latency_ms: f64,
    /// Percentage in `[0, 100]`
    #[serde(alias = "uptime_pct")]
    pub uptime_percent: f64,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid sample #{index}: {reason}")]
    InvalidSample { index: usize, reason: String },
}

// ─── Store ───────────────────────────────────────────────────────

/// Read-only snapshot of every sample, grouped by region.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it
/// afterwards, so handlers read it without locking.
#[derive(Debug, Default)]
pub struct Dataset {
    by_region: HashMap<String, Vec<TelemetrySample>>,
    len: usize,
}

impl Dataset {
    /// Read and validate a JSON array of samples from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_owned(),
            source,
        })?;
        let samples: Vec<TelemetrySample> =
            serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
                path: path.to_owned(),
                source,
            })?;
        Self::from_samples(samples)
    }

    pub fn from_samples(samples: Vec<TelemetrySample>) -> Result<Self, DatasetError> {
        let len = samples.len();
        let mut by_region: HashMap<String, Vec<TelemetrySample>> = HashMap::new();

        for (index, sample) in samples.into_iter().enumerate() {
            validate(&sample).map_err(|reason| DatasetError::InvalidSample { index, reason })?;
            by_region
                .entry(sample.region.clone())
                .or_default()
                .push(sample);
        }

        Ok(Self { by_region, len })
    }

    /// Samples whose `region` equals `region` exactly. Empty if none.
    pub fn samples_for_region(&self, region: &str) -> &[TelemetrySample] {
        self.by_region
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn region_count(&self) -> usize {
        self.by_region.len()
    }
}

fn validate(sample: &TelemetrySample) -> Result<(), String> {
    if !sample.latency_ms.is_finite() || sample.latency_ms < 0.0 {
        return Err(format!(
            "latency_ms must be a non-negative number, got {}",
            sample.latency_ms
        ));
    }
    if !sample.uptime_percent.is_finite() || !(0.0..=100.0).contains(&sample.uptime_percent) {
        return Err(format!(
            "uptime_percent must be within [0, 100], got {}",
            sample.uptime_percent
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample(region: &str, latency_ms: f64, uptime_percent: f64) -> TelemetrySample {
    TelemetrySample {
        region: region.into(),
        latency_ms,
        uptime_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_samples_by_region() {
        let ds = Dataset::from_samples(vec![
            sample("us-east", 100.0, 99.0),
            sample("emea", 120.0, 98.0),
            sample("us-east", 200.0, 97.0),
        ])
        .unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.region_count(), 2);

        let us_east = ds.samples_for_region("us-east");
        assert_eq!(us_east.len(), 2);
        assert_eq!(us_east[0].latency_ms, 100.0);
        assert_eq!(us_east[1].latency_ms, 200.0);
    }

    #[test]
    fn region_match_is_exact() {
        let ds = Dataset::from_samples(vec![sample("us-east", 100.0, 99.0)]).unwrap();
        assert!(ds.samples_for_region("US-EAST").is_empty());
        assert!(ds.samples_for_region(" us-east").is_empty());
        assert!(ds.samples_for_region("nowhere").is_empty());
    }

    #[test]
    fn rejects_out_of_range_samples() {
        let err = Dataset::from_samples(vec![
            sample("apac", 10.0, 99.0),
            sample("apac", -1.0, 99.0),
        ])
        .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidSample { index: 1, .. }));

        let err = Dataset::from_samples(vec![sample("apac", 10.0, 100.5)]).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidSample { index: 0, .. }));
    }

    #[test]
    fn parses_records_with_extra_fields() {
        let json = r#"[
            {"region": "apac", "service": "checkout", "latency_ms": 150.5, "uptime_pct": 98.2, "timestamp": 20250301},
            {"region": "emea", "latency_ms": 120, "uptime_percent": 99}
        ]"#;
        let samples: Vec<TelemetrySample> = serde_json::from_str(json).unwrap();
        assert_eq!(samples[0], sample("apac", 150.5, 98.2));
        assert_eq!(samples[1], sample("emea", 120.0, 99.0));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Dataset::load("does/not/exist.json").unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "latency-pings-malformed-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"[{"region": "apac"}]"#).unwrap();

        let err = Dataset::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, DatasetError::Parse { .. }));
    }
}

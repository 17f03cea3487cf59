//! Writes a reproducible synthetic telemetry snapshot for local runs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::Serialize;

// ─── Pools ───────────────────────────────────────────────────────

static REGIONS: &[&str] = &["apac", "emea", "amer", "us-east", "us-west", "eu-central"];

static SERVICES: &[&str] = &["analytics", "catalog", "checkout", "payments", "recommendations", "support"];

const FIRST_TIMESTAMP: u64 = 20250301;

#[derive(Parser)]
struct Args {
    /// Output file
    #[arg(long, default_value = "data/telemetry.json")]
    out: PathBuf,

    /// Samples generated for every region
    #[arg(long, default_value_t = 12)]
    per_region: usize,

    /// RNG seed; the same seed always yields the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Serialize)]
struct Record {
    region: &'static str,
    service: &'static str,
    latency_ms: f64,
    uptime_percent: f64,
    timestamp: u64,
}

// Same rounding as `stats::round2` in the server, which this binary cannot import.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn generate(rng: &mut StdRng, per_region: usize) -> Vec<Record> {
    let mut records = Vec::with_capacity(REGIONS.len() * per_region);

    for &region in REGIONS {
        for i in 0..per_region {
            records.push(Record {
                region,
                service: SERVICES[rng.gen_range(0..SERVICES.len())],
                latency_ms: round2(rng.gen_range(100.0..240.0)),
                uptime_percent: round2(rng.gen_range(97.0..100.0)),
                timestamp: FIRST_TIMESTAMP + i as u64,
            });
        }
    }

    records
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    // Deterministic RNG so re-runs produce the same data.
    let mut rng = StdRng::seed_from_u64(args.seed);
    let records = generate(&mut rng, args.per_region);

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(&args.out)?);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!(
        out = %args.out.display(),
        samples = records.len(),
        seed = args.seed,
        "dataset written"
    );
    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Serve latency / uptime aggregates over a static telemetry snapshot.
#[derive(Clone, Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Address the HTTP server binds to
    #[arg(long, env = "LATENCY_PINGS_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// JSON file holding the telemetry samples
    #[arg(long, env = "LATENCY_PINGS_DATASET", default_value = "data/telemetry.json")]
    pub dataset: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["latency-pings"]).unwrap();
        assert_eq!(args.listen.port(), 3000);
        assert_eq!(args.dataset, PathBuf::from("data/telemetry.json"));
    }

    #[test]
    fn overrides_and_rejects_bad_address() {
        let args = Args::try_parse_from([
            "latency-pings",
            "--listen",
            "127.0.0.1:8080",
            "--dataset",
            "/tmp/pings.json",
        ])
        .unwrap();
        assert_eq!(args.listen, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(args.dataset, PathBuf::from("/tmp/pings.json"));

        assert!(Args::try_parse_from(["latency-pings", "--listen", "not-an-addr"]).is_err());
    }
}

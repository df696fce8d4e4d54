//! Command-line interface.

use clap::Parser;

use crate::config::{
    LimitConfig, ListenerConfig, ObservabilityConfig, ReplicatorConfig, TimeoutConfig,
};

#[derive(Debug, Parser)]
#[command(name = "request-replicator", version)]
#[command(about = "Replicates every inbound HTTP request to a fixed set of targets", long_about = None)]
pub struct Cli {
    /// Target base URLs (e.g. http://10.0.0.5:9000)
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Connect timeout per target, in seconds
    #[arg(long, default_value_t = 5)]
    pub connect_timeout_secs: u64,

    /// Timeout for a whole forward, in seconds
    #[arg(long, default_value_t = 30)]
    pub forward_timeout_secs: u64,

    /// Largest inbound body that will be replicated, in bytes
    #[arg(long, default_value_t = 64 * 1024 * 1024)]
    pub max_body_bytes: usize,

    /// Expose Prometheus metrics on this address
    #[arg(long)]
    pub metrics_address: Option<String>,
}

impl From<Cli> for ReplicatorConfig {
    fn from(cli: Cli) -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: cli.bind,
            },
            targets: cli.targets,
            timeouts: TimeoutConfig {
                connect_secs: cli.connect_timeout_secs,
                forward_secs: cli.forward_timeout_secs,
            },
            limits: LimitConfig {
                max_body_bytes: cli.max_body_bytes,
            },
            observability: ObservabilityConfig {
                metrics_address: cli.metrics_address,
            },
        }
    }
}

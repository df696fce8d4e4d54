use std::net::SocketAddr;

use clap::Parser;

use request_replicator::cli::Cli;
use request_replicator::lifecycle::{startup, Shutdown, StartupPlan};
use request_replicator::observability::{logging, metrics};
use request_replicator::{net, HttpServer, ReplicatorError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match startup::plan(Cli::parse())? {
        StartupPlan::Usage(usage) => {
            println!("{usage}");
            return Ok(());
        }
        StartupPlan::Serve(config) => config,
    };

    logging::init();
    tracing::info!("request-replicator v{} starting", env!("CARGO_PKG_VERSION"));
    startup::report(&config);

    if let Some(address) = &config.observability.metrics_address {
        // Validated during startup planning.
        let addr: SocketAddr = address
            .parse()
            .map_err(|e| format!("invalid metrics address '{address}': {e}"))?;
        metrics::init_metrics(addr).map_err(ReplicatorError::from)?;
    }

    let listener = net::bind(&config.listener)
        .await
        .map_err(ReplicatorError::from)?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(ReplicatorError::from)?;

    tracing::info!("Shutdown complete");
    Ok(())
}

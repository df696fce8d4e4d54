//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn the command line into a validated configuration
//! - Decide between printing usage and serving
//! - Report the effective configuration once logging is up
//!
//! # Design Decisions
//! - Fail fast: any validation error is fatal
//! - Nothing here binds a socket

use clap::CommandFactory;

use crate::cli::Cli;
use crate::config::{unusable_targets, validate_config, ReplicatorConfig};
use crate::error::ReplicatorError;

/// What the process should do after parsing its arguments.
#[derive(Debug)]
pub enum StartupPlan {
    /// No targets were given: print this usage text and exit.
    Usage(String),
    /// Serve with this validated configuration.
    Serve(ReplicatorConfig),
}

pub fn plan(cli: Cli) -> Result<StartupPlan, ReplicatorError> {
    if cli.targets.is_empty() {
        let usage = Cli::command().render_usage().to_string();
        return Ok(StartupPlan::Usage(usage));
    }

    let config = ReplicatorConfig::from(cli);
    validate_config(&config).map_err(ReplicatorError::Config)?;
    Ok(StartupPlan::Serve(config))
}

/// Log the effective configuration and warn about targets that cannot work.
pub fn report(config: &ReplicatorConfig) {
    match serde_json::to_string(config) {
        Ok(json) => tracing::debug!(config = %json, "Effective configuration"),
        Err(e) => tracing::debug!(error = %e, "Configuration not serializable"),
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        targets = ?config.targets,
        forward_timeout_secs = config.timeouts.forward_secs,
        "Configuration loaded"
    );

    for (target, error) in unusable_targets(config) {
        tracing::warn!(
            target_url = %target,
            error = %error,
            "Target will fail every forward"
        );
    }
}

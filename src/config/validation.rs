//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Report targets that will fail every forward
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Unparseable targets are reported separately and do not block startup

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ReplicatorConfig;
use crate::forwarding::{ForwardError, Target};

/// A semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one target is required")]
    NoTargets,

    #[error("invalid {field} '{value}': expected host:port")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Validate `config`, collecting every error.
pub fn validate_config(config: &ReplicatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.targets.is_empty() {
        errors.push(ValidationError::NoTargets);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "bind address",
            value: config.listener.bind_address.clone(),
        });
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field: "metrics address",
                value: addr.clone(),
            });
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "connect timeout",
        });
    }
    if config.timeouts.forward_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "forward timeout",
        });
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero {
            field: "max body bytes",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Targets that do not parse as absolute URLs, with the reason.
pub fn unusable_targets(config: &ReplicatorConfig) -> Vec<(Target, ForwardError)> {
    config
        .targets
        .iter()
        .map(|raw| Target::from(raw.as_str()))
        .filter_map(|target| target.base_url().err().map(|e| (target, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(targets: &[&str]) -> ReplicatorConfig {
        ReplicatorConfig {
            targets: targets.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&config_with(&["http://127.0.0.1:9000"])).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = config_with(&[]);
        config.listener.bind_address = "localhost".into();
        config.timeouts.forward_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::NoTargets));
        assert!(errors.contains(&ValidationError::Zero {
            field: "forward timeout"
        }));
    }

    #[test]
    fn test_malformed_target_is_not_a_validation_error() {
        let config = config_with(&["http://good:1", "::bad::", "https://secure:443"]);
        assert!(validate_config(&config).is_ok());

        let unusable: Vec<_> = unusable_targets(&config)
            .into_iter()
            .map(|(target, _)| target.to_string())
            .collect();
        assert_eq!(unusable, ["::bad::", "https://secure:443"]);
    }
}

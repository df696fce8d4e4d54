//! Configuration schema definitions.
//!
//! All types derive Serde traits so the effective configuration can be
//! logged as JSON at startup.

use serde::{Deserialize, Serialize};

/// Root configuration for the replicator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ReplicatorConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Target base URLs, in operator order.
    pub targets: Vec<String>,

    /// Outbound timeouts.
    pub timeouts: TimeoutConfig,

    /// Inbound limits.
    pub limits: LimitConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Per-target timeouts for forwarded requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// TCP connect timeout in seconds.
    pub connect_secs: u64,

    /// Whole exchange timeout (connect to response head) in seconds.
    pub forward_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            forward_secs: 30,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Largest inbound body buffered for replication, in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Prometheus scrape address; metrics export is off when unset.
    pub metrics_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReplicatorConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.targets.is_empty());
        assert_eq!(config.timeouts.connect_secs, 5);
        assert_eq!(config.timeouts.forward_secs, 30);
        assert!(config.observability.metrics_address.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ReplicatorConfig =
            serde_json::from_str(r#"{"targets":["http://a:1"],"timeouts":{"forward_secs":2}}"#)
                .unwrap();
        assert_eq!(config.targets, ["http://a:1"]);
        assert_eq!(config.timeouts.forward_secs, 2);
        assert_eq!(config.timeouts.connect_secs, 5);
        assert_eq!(config.limits.max_body_bytes, 64 * 1024 * 1024);
    }
}

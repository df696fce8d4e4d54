//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (cli.rs)
//!     → schema.rs (ReplicatorConfig with defaults)
//!     → validation.rs (semantic checks)
//!     → ReplicatorConfig (validated, immutable)
//!     → handed to the HTTP server and dispatcher at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; there is no reload
//! - All fields have defaults so only targets are required
//! - Malformed targets are warnings, not errors: they fail per request

pub mod schema;
pub mod validation;

pub use schema::{
    LimitConfig, ListenerConfig, ObservabilityConfig, ReplicatorConfig, TimeoutConfig,
};
pub use validation::{unusable_targets, validate_config, ValidationError};

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler and forward tasks produce:
//!     → logging.rs (structured events on stderr)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Operators reading stderr / log aggregation
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every inbound request gets a replication ID that tags all its forward spans
//! - Metrics are cheap when no exporter is installed (no-op recorder)

pub mod logging;
pub mod metrics;

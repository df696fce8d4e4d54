//! Request replication subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (axum handler)
//!     → inbound.rs (buffer body once into immutable Bytes)
//!     → dispatcher.rs (one tokio task per target, no waiting)
//!         → cloner.rs (target URL + headers + shared body)
//!         → hyper-util client (connect/write/read)
//!         → outcome.rs (ForwardOutcome pushed to bounded channel)
//!     → 202 Accepted to the caller
//! ```
//!
//! # Design Decisions
//! - The body is read exactly once; every clone holds a cheap handle to the same bytes
//! - Targets are fully independent: a failure is recorded for that target only
//! - Outcomes are for diagnostics; nothing on the response path reads them

pub mod cloner;
pub mod dispatcher;
pub mod headers;
pub mod inbound;
pub mod outcome;
pub mod target;

pub use cloner::clone_for_target;
pub use dispatcher::Dispatcher;
pub use inbound::{CaptureError, InboundRequest};
pub use outcome::{ForwardError, ForwardOutcome, Outcomes};
pub use target::Target;

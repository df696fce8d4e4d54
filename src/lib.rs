//! HTTP request replicator.
//!
//! Accepts any HTTP request, acknowledges it with `202 Accepted` and forwards
//! an equivalent copy to every configured target concurrently.
//!
//! ```text
//!     Client Request ──▶ http::server ──▶ forwarding::dispatcher ──┬──▶ target 1
//!     ◀── 202 Accepted                         (one task each)    ├──▶ target 2
//!                                                                 └──▶ target N
//! ```

// Core subsystems
pub mod config;
pub mod forwarding;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod cli;
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::ReplicatorConfig;
pub use error::ReplicatorError;
pub use forwarding::{Dispatcher, ForwardOutcome, Target};
pub use http::HttpServer;
pub use lifecycle::Shutdown;

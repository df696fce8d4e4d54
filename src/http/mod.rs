//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, any path / any method)
//!     → replicate_handler (buffer body, dispatch, acknowledge)
//!     → 202 Accepted to the caller
//! ```

pub mod server;

pub use server::{AppState, HttpServer};

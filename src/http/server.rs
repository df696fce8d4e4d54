//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router routing every path and method to the replicator
//! - Wire up middleware (tracing)
//! - Serve on a bound listener with graceful shutdown
//! - Acknowledge each request with 202 once forwarding has started

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ReplicatorConfig;
use crate::forwarding::{Dispatcher, InboundRequest, Target};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub max_body_bytes: usize,
}

/// HTTP front end of the replicator.
pub struct HttpServer {
    router: Router,
    config: ReplicatorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ReplicatorConfig) -> Self {
        let targets = config
            .targets
            .iter()
            .map(|raw| Target::from(raw.as_str()))
            .collect();
        let dispatcher = Dispatcher::new(targets, &config.timeouts);

        let state = AppState {
            dispatcher,
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(replicate_handler))
            .route("/", any(replicate_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for serving on a custom transport or testing with `oneshot`.
    ///
    /// Handlers extract `ConnectInfo<SocketAddr>`, so the caller must provide it.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            targets = self.config.targets.len(),
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Buffers the body, starts one forward per target and acknowledges at once.
async fn replicate_handler(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let replication_id = Uuid::new_v4();
    metrics::record_request();

    tracing::debug!(
        replication_id = %replication_id,
        method = %request.method(),
        path = %request.uri().path(),
        client = %client_addr,
        "Replicating request"
    );

    let captured = InboundRequest::capture(request, client_addr, state.max_body_bytes).await;
    let inbound = match captured {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::warn!(
                replication_id = %replication_id,
                error = %e,
                "Inbound body unreadable, nothing forwarded"
            );
            return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
        }
    };

    let outcomes = state.dispatcher.dispatch(inbound, replication_id);
    tokio::spawn(outcomes.summarize(replication_id));

    StatusCode::ACCEPTED.into_response()
}

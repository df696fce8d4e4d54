//! Fan-out dispatch.
//!
//! # Responsibilities
//! - Own the immutable target list and the shared HTTP client
//! - Spawn one task per target per inbound request
//! - Report each task's outcome into a bounded completion channel
//!
//! # Design Decisions
//! - Tasks are unbounded by a worker pool; the target list is operator-sized
//! - No cancellation: a task runs until its response, error or timeout
//! - Upstream responses are dropped unread, releasing their connection

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{Response, StatusCode},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::TimeoutConfig;
use crate::forwarding::{
    cloner::clone_for_target,
    inbound::InboundRequest,
    outcome::{ForwardError, ForwardOutcome, Outcomes},
    target::Target,
};
use crate::observability::metrics;

type UpstreamResponse = Response<hyper::body::Incoming>;

/// Replicates inbound requests to a fixed set of targets.
#[derive(Clone)]
pub struct Dispatcher {
    targets: Arc<[Target]>,
    client: Client<HttpConnector, Body>,
    forward_timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher over `targets`; the list never changes afterwards.
    pub fn new(targets: Vec<Target>, timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            targets: targets.into(),
            client,
            forward_timeout: Duration::from_secs(timeouts.forward_secs),
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Start forwarding `inbound` to every target and return at once.
    ///
    /// The returned [`Outcomes`] may be dropped; forwarding continues either way.
    pub fn dispatch(&self, inbound: InboundRequest, replication_id: Uuid) -> Outcomes {
        let inbound = Arc::new(inbound);
        let (tx, outcomes) = Outcomes::channel(self.targets.len());

        for target in self.targets.iter() {
            let task = ForwardTask {
                client: self.client.clone(),
                target: target.clone(),
                inbound: Arc::clone(&inbound),
                timeout: self.forward_timeout,
            };
            let tx = tx.clone();
            let span = tracing::info_span!(
                "forward",
                replication_id = %replication_id,
                target_url = %target
            );

            tokio::spawn(
                async move {
                    let outcome = task.run().await;
                    // Capacity matches the target count; a full or closed
                    // channel only means nobody is listening.
                    let _ = tx.try_send(outcome);
                }
                .instrument(span),
            );
        }

        tracing::debug!(
            replication_id = %replication_id,
            targets = self.targets.len(),
            "Forward tasks spawned"
        );

        outcomes
    }
}

struct ForwardTask {
    client: Client<HttpConnector, Body>,
    target: Target,
    inbound: Arc<InboundRequest>,
    timeout: Duration,
}

impl ForwardTask {
    async fn run(self) -> ForwardOutcome {
        let started = Instant::now();

        let result = self.send().await;
        let outcome = match result {
            Ok(status) => ForwardOutcome::Delivered {
                target: self.target,
                status,
            },
            Err(error) => ForwardOutcome::Failed {
                target: self.target,
                error,
            },
        };

        let elapsed = started.elapsed();
        outcome.log(elapsed);
        metrics::record_forward(&outcome, elapsed);
        outcome
    }

    async fn send(&self) -> Result<StatusCode, ForwardError> {
        let request = clone_for_target(&self.inbound, &self.target)?;

        let response: UpstreamResponse =
            tokio::time::timeout(self.timeout, self.client.request(request))
                .await
                .map_err(|_| ForwardError::Timeout(self.timeout))??;

        Ok(response.status())
    }
}

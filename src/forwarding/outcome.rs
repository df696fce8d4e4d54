//! Forward outcomes and the per-target error taxonomy.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::forwarding::target::Target;

/// Why forwarding to a single target did not produce a success response.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The target string is not an absolute URL.
    #[error("invalid target URL: {0}")]
    InvalidTarget(String),

    /// The outbound request could not be assembled.
    #[error("failed to build outbound request: {0}")]
    RequestConstruction(#[from] axum::http::Error),

    /// Connect, write or read against the target failed.
    #[error("transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The target did not answer within the forward timeout.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// The target answered with a non-success status. Informational only.
    #[error("target responded with {0}")]
    UpstreamStatus(StatusCode),
}

impl ForwardError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::InvalidTarget(_) => "invalid_target",
            ForwardError::RequestConstruction(_) => "request_error",
            ForwardError::Transport(_) => "transport_error",
            ForwardError::Timeout(_) => "timeout",
            ForwardError::UpstreamStatus(_) => "upstream_error",
        }
    }
}

/// Result of one forwarding attempt.
#[derive(Debug)]
pub enum ForwardOutcome {
    /// The target returned a response (any status).
    Delivered { target: Target, status: StatusCode },
    /// No response was obtained.
    Failed { target: Target, error: ForwardError },
}

impl ForwardOutcome {
    pub fn target(&self) -> &Target {
        match self {
            ForwardOutcome::Delivered { target, .. } | ForwardOutcome::Failed { target, .. } => {
                target
            }
        }
    }

    /// True when the target answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        matches!(self, ForwardOutcome::Delivered { status, .. } if status.is_success())
    }

    /// Metrics label: `delivered` or the error kind.
    pub fn label(&self) -> &'static str {
        match self {
            ForwardOutcome::Delivered { status, .. } if status.is_success() => "delivered",
            ForwardOutcome::Delivered { .. } => "upstream_error",
            ForwardOutcome::Failed { error, .. } => error.kind(),
        }
    }

    pub(crate) fn log(&self, elapsed: Duration) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        match self {
            ForwardOutcome::Delivered { target, status } if status.is_success() => {
                tracing::info!(
                    target_url = %target,
                    status = status.as_u16(),
                    elapsed_ms,
                    "Response from target"
                );
            }
            ForwardOutcome::Delivered { target, status } => {
                tracing::info!(
                    target_url = %target,
                    status = status.as_u16(),
                    error = %ForwardError::UpstreamStatus(*status),
                    elapsed_ms,
                    "Response from target"
                );
            }
            ForwardOutcome::Failed { target, error } => {
                tracing::warn!(
                    target_url = %target,
                    error = %error,
                    kind = error.kind(),
                    elapsed_ms,
                    "Forwarding failed"
                );
            }
        }
    }
}

/// Completion channel for one replicated request.
///
/// Capacity equals the number of targets, so forward tasks never wait on it
/// and it may be dropped unread.
#[derive(Debug)]
pub struct Outcomes {
    rx: mpsc::Receiver<ForwardOutcome>,
    expected: usize,
}

impl Outcomes {
    pub(crate) fn channel(expected: usize) -> (mpsc::Sender<ForwardOutcome>, Self) {
        let (tx, rx) = mpsc::channel(expected.max(1));
        (tx, Self { rx, expected })
    }

    /// Number of forward tasks that report into this channel.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Wait for every forward task and return their outcomes in completion order.
    pub async fn collect(mut self) -> Vec<ForwardOutcome> {
        let mut outcomes = Vec::with_capacity(self.expected);
        while let Some(outcome) = self.rx.recv().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Drain the channel and log one summary line.
    pub async fn summarize(self, replication_id: Uuid) {
        let expected = self.expected;
        let outcomes = self.collect().await;
        let delivered = outcomes.iter().filter(|o| o.is_success()).count();

        tracing::info!(
            replication_id = %replication_id,
            targets = expected,
            delivered,
            failed = outcomes.len() - delivered,
            "Replication finished"
        );
    }
}

//! Dispatcher outcome tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{Request, StatusCode};
use request_replicator::config::TimeoutConfig;
use request_replicator::forwarding::{Dispatcher, ForwardError, ForwardOutcome, InboundRequest};
use uuid::Uuid;

mod common;

fn inbound(path: &str, body: &'static str) -> InboundRequest {
    let (parts, _) = Request::builder()
        .method("POST")
        .uri(path)
        .header("host", "front.example.com")
        .body(())
        .unwrap()
        .into_parts();
    let client: SocketAddr = "5.6.7.8:9999".parse().unwrap();
    InboundRequest::new(parts, Bytes::from_static(body.as_bytes()), client)
}

#[tokio::test]
async fn test_one_outcome_per_target() {
    let (ok_addr, mut ok_rx) = common::start_recording_backend().await;
    let (bad_addr, _bad_rx) =
        common::start_backend(StatusCode::SERVICE_UNAVAILABLE, Duration::ZERO).await;
    let dead_addr = common::unreachable_addr().await;

    let targets = vec![
        format!("http://{ok_addr}").into(),
        format!("http://{bad_addr}").into(),
        format!("http://{dead_addr}").into(),
        "::not a url::".into(),
    ];
    let dispatcher = Dispatcher::new(targets, &TimeoutConfig::default());
    assert_eq!(dispatcher.targets().len(), 4);

    let outcomes = dispatcher.dispatch(inbound("/hook", "ping"), Uuid::new_v4());
    assert_eq!(outcomes.expected(), 4);

    let outcomes = tokio::time::timeout(Duration::from_secs(10), outcomes.collect())
        .await
        .expect("forward tasks did not finish");
    assert_eq!(outcomes.len(), 4);

    let find = |target: String| {
        outcomes
            .iter()
            .find(|o| o.target().as_str() == target)
            .expect("missing outcome")
    };

    assert!(find(format!("http://{ok_addr}")).is_success());
    assert!(matches!(
        find(format!("http://{bad_addr}")),
        ForwardOutcome::Delivered { status: StatusCode::SERVICE_UNAVAILABLE, .. }
    ));
    assert!(matches!(
        find(format!("http://{dead_addr}")),
        ForwardOutcome::Failed { error: ForwardError::Transport(_), .. }
    ));
    assert!(matches!(
        find("::not a url::".to_string()),
        ForwardOutcome::Failed { error: ForwardError::InvalidTarget(_), .. }
    ));

    let seen = common::next_request(&mut ok_rx).await;
    assert_eq!(seen.headers["host"], "front.example.com");
    assert_eq!(seen.headers["x-forwarded-for"], "5.6.7.8");
    assert_eq!(seen.body, "ping");
}

#[tokio::test]
async fn test_slow_target_times_out() {
    let (slow_addr, _rx) = common::start_backend(StatusCode::OK, Duration::from_secs(10)).await;
    let timeouts = TimeoutConfig {
        connect_secs: 1,
        forward_secs: 1,
    };
    let dispatcher = Dispatcher::new(vec![format!("http://{slow_addr}").into()], &timeouts);

    let outcomes = dispatcher
        .dispatch(inbound("/", ""), Uuid::new_v4())
        .collect()
        .await;

    assert!(matches!(
        outcomes.as_slice(),
        [ForwardOutcome::Failed { error: ForwardError::Timeout(_), .. }]
    ));
}

#[tokio::test]
async fn test_dropped_outcomes_do_not_stop_forwarding() {
    let (addr, mut rx) = common::start_recording_backend().await;
    let dispatcher = Dispatcher::new(
        vec![format!("http://{addr}").into()],
        &TimeoutConfig::default(),
    );

    drop(dispatcher.dispatch(inbound("/fire", "and forget"), Uuid::new_v4()));

    let seen = common::next_request(&mut rx).await;
    assert_eq!(seen.uri, "/fire");
    assert_eq!(seen.body, "and forget");
}

#[tokio::test]
async fn test_non_http_targets_fail_as_invalid() {
    let (live_addr, mut live_rx) = common::start_recording_backend().await;
    let targets = vec![
        format!("https://{live_addr}").into(),
        "ftp://example.com".into(),
        format!("http://{live_addr}").into(),
    ];
    let dispatcher = Dispatcher::new(targets, &TimeoutConfig::default());

    let outcomes = dispatcher
        .dispatch(inbound("/secure", "x"), Uuid::new_v4())
        .collect()
        .await;
    assert_eq!(outcomes.len(), 3);

    let invalid = outcomes
        .iter()
        .filter(|o| matches!(o, ForwardOutcome::Failed { error: ForwardError::InvalidTarget(_), .. }))
        .count();
    assert_eq!(invalid, 2);
    assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 1);

    let seen = common::next_request(&mut live_rx).await;
    assert_eq!(seen.uri, "/secure");
}

//! Retry Behavior Tests - Backoff, Timeouts, and Exhaustion
//!
//! Runs the client against scripted transports under paused tokio
//! time, so the exponential backoff schedule (200ms, 400ms, ...)
//! can be asserted exactly and timeout tests finish instantly.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockall::mock;
use serde_json::json;
use tokio::time::Instant;

use songstats::{
    BoxError, ClientConfig, HttpTransport, Params, SongstatsClient, TransportRequest,
    TransportResponse,
};

mock! {
    pub Transport {}

    #[async_trait::async_trait]
    impl HttpTransport for Transport {
        async fn execute(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, BoxError>;

        async fn shutdown(&self);
    }
}

fn client_over(transport: MockTransport, max_retries: u32) -> SongstatsClient {
    let config = ClientConfig::new("test_key").with_max_retries(max_retries);
    SongstatsClient::with_transport(config, Arc::new(transport)).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_persistent_503_exhausts_retries() {
    let mut transport = MockTransport::new();
    transport
        .expect_execute()
        .times(3)
        .returning(|_| Ok(TransportResponse::json(503, &json!({ "result": "error" }))));

    let client = client_over(transport, 2);
    let start = Instant::now();
    let err = client.info().status().await.unwrap_err();

    assert!(err.is_api());
    assert_eq!(err.status_code(), Some(503));
    // Two backoffs: 200ms then 400ms of virtual time.
    assert_eq!(start.elapsed(), Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn test_backoff_doubles_per_attempt() {
    let mut transport = MockTransport::new();
    transport
        .expect_execute()
        .times(4)
        .returning(|_| Ok(TransportResponse::json(500, &json!({ "result": "error" }))));

    let client = client_over(transport, 3);
    let start = Instant::now();
    let err = client.info().status().await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(start.elapsed(), Duration::from_millis(200 + 400 + 800));
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_then_success() {
    let mut transport = MockTransport::new();
    transport
        .expect_execute()
        .times(1)
        .returning(|_| Err("connection refused".into()));
    transport
        .expect_execute()
        .times(1)
        .returning(|_| Ok(TransportResponse::json(200, &json!({ "result": "success" }))));

    let client = client_over(transport, 2);
    let start = Instant::now();
    let data = client.info().status().await.unwrap();

    assert_eq!(data["result"], "success");
    assert_eq!(start.elapsed(), Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn test_429_then_success() {
    let mut transport = MockTransport::new();
    transport.expect_execute().times(1).returning(|_| {
        Ok(TransportResponse::json(
            429,
            &json!({ "message": "Too many requests" }),
        ))
    });
    transport
        .expect_execute()
        .times(1)
        .returning(|_| Ok(TransportResponse::json(200, &json!({ "result": "success" }))));

    let client = client_over(transport, 2);
    let data = client.info().status().await.unwrap();
    assert_eq!(data["result"], "success");
}

#[tokio::test(start_paused = true)]
async fn test_client_error_is_not_retried() {
    let mut transport = MockTransport::new();
    transport
        .expect_execute()
        .times(1)
        .returning(|_| Ok(TransportResponse::json(400, &json!({ "message": "Bad params" }))));

    let client = client_over(transport, 2);
    let start = Instant::now();
    let err = client.info().status().await.unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(start.elapsed(), Duration::ZERO, "client errors must fail fast");
}

#[tokio::test(start_paused = true)]
async fn test_retryable_status_exhaustion_reports_api_error() {
    // With retries disabled the first 503 must surface directly.
    let mut transport = MockTransport::new();
    transport
        .expect_execute()
        .times(1)
        .returning(|_| Ok(TransportResponse::json(503, &json!({ "message": "Maintenance" }))));

    let client = client_over(transport, 0);
    let err = client.info().status().await.unwrap_err();
    assert_eq!(err.to_string(), "Songstats API error (503): Maintenance");
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_transport_failure_carries_cause() {
    let mut transport = MockTransport::new();
    transport
        .expect_execute()
        .times(3)
        .returning(|_| Err("dns failure".into()));

    let client = client_over(transport, 2);
    let err = client.info().status().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.to_string(), "transport error: dns failure");
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_validation_failure_skips_transport_entirely() {
    let mut transport = MockTransport::new();
    transport.expect_execute().times(0);

    let client = client_over(transport, 2);
    let err = client.tracks().info(Params::new()).await.unwrap_err();
    assert!(err.is_validation());
}

/// Transport that sleeps per scripted delay before answering 200.
struct SlowTransport {
    delays: Mutex<VecDeque<Duration>>,
    calls: AtomicU32,
}

impl SlowTransport {
    fn new(delays: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            delays: Mutex::new(delays.into_iter().collect()),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl HttpTransport for SlowTransport {
    async fn execute(&self, _request: TransportRequest) -> Result<TransportResponse, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = {
            let mut delays = self.delays.lock().unwrap();
            delays.pop_front().unwrap_or(Duration::ZERO)
        };
        tokio::time::sleep(delay).await;
        Ok(TransportResponse::json(200, &json!({ "result": "success" })))
    }
}

#[tokio::test(start_paused = true)]
async fn test_timeout_cancels_attempt_and_retries() {
    let transport = Arc::new(SlowTransport::new([
        Duration::from_secs(10),
        Duration::ZERO,
    ]));
    let config = ClientConfig::new("test_key")
        .with_timeout(Duration::from_secs(5))
        .with_max_retries(2);
    let client = SongstatsClient::with_transport(config, transport.clone()).unwrap();

    let start = Instant::now();
    let data = client.info().status().await.unwrap();

    assert_eq!(data["result"], "success");
    assert_eq!(transport.calls(), 2);
    // One 5s timeout plus the 200ms backoff before the second try.
    assert_eq!(start.elapsed(), Duration::from_millis(5200));
}

#[tokio::test(start_paused = true)]
async fn test_all_attempts_time_out() {
    let transport = Arc::new(SlowTransport::new([
        Duration::from_secs(10),
        Duration::from_secs(10),
        Duration::from_secs(10),
    ]));
    let config = ClientConfig::new("test_key")
        .with_timeout(Duration::from_secs(5))
        .with_max_retries(2);
    let client = SongstatsClient::with_transport(config, transport.clone()).unwrap();

    let err = client.info().status().await.unwrap_err();

    assert!(err.is_transport());
    assert!(
        err.to_string().contains("timed out after 5000ms"),
        "unexpected message: {err}"
    );
    assert_eq!(transport.calls(), 3);
}

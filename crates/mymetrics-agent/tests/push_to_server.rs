//! Agent sink against a real server router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::Instant;

use mymetrics_agent::{push_all, HttpSink, MetricSink};
use mymetrics_core::{MetricKind, MetricValue, MetricsError};
use mymetrics_server::{
    app_state::AppState,
    router::build_router,
    storage::{MemStorage, Storage},
};

async fn start_server() -> (String, Arc<MemStorage>) {
    let storage = Arc::new(MemStorage::new());
    let shared: Arc<dyn Storage> = storage.clone();
    let app = build_router(AppState::new(shared));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), storage)
}

#[tokio::test]
async fn pushed_metrics_land_in_storage() {
    let (endpoint, storage) = start_server().await;
    let sink = HttpSink::new(endpoint, Duration::from_secs(5)).unwrap();

    let batch = HashMap::from([
        ("PollCount".to_string(), MetricValue::Counter(3)),
        ("Alloc".to_string(), MetricValue::Gauge(1536.5)),
        ("heap/used ratio".to_string(), MetricValue::Gauge(0.25)),
    ]);
    let deadline = Instant::now() + Duration::from_secs(5);

    assert!(push_all(&sink, &batch, deadline).await.is_ok());
    assert!(push_all(&sink, &batch, deadline).await.is_ok());

    assert_eq!(storage.get("PollCount", MetricKind::Counter).unwrap(), MetricValue::Counter(6));
    assert_eq!(storage.get("Alloc", MetricKind::Gauge).unwrap(), MetricValue::Gauge(1536.5));
    assert_eq!(
        storage.get("heap/used ratio", MetricKind::Gauge).unwrap(),
        MetricValue::Gauge(0.25)
    );
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sink = HttpSink::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let err = sink.send("x", MetricValue::Counter(1)).await.expect_err("must fail");
    assert!(matches!(err, MetricsError::Io(_)), "got {err:?}");
}

#[test]
fn https_endpoints_get_a_tls_client() {
    let sink = HttpSink::new("https://metrics.example:8443", Duration::from_secs(1)).unwrap();
    assert_eq!(sink.endpoint(), "https://metrics.example:8443");
}

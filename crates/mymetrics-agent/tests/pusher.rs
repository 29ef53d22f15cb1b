#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use mymetrics_agent::push_all;
use mymetrics_core::MetricValue;

use common::RecordingSink;

fn batch() -> HashMap<String, MetricValue> {
    HashMap::from([
        ("a".to_string(), MetricValue::Counter(1)),
        ("b".to_string(), MetricValue::Gauge(2.0)),
        ("c".to_string(), MetricValue::Gauge(3.5)),
    ])
}

#[tokio::test]
async fn every_entry_is_sent() {
    let sink = RecordingSink::default();
    let report = push_all(&sink, &batch(), Instant::now() + Duration::from_secs(5)).await;

    assert!(report.is_ok());
    assert_eq!(report.sent, 3);
    assert_eq!(sink.names(), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn one_failure_does_not_stop_the_batch() {
    let sink = RecordingSink {
        fail_on: vec!["a"],
        ..Default::default()
    };
    let report = push_all(&sink, &batch(), Instant::now() + Duration::from_secs(5)).await;

    assert_eq!(report.sent, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "a");
    assert_eq!(sink.names(), vec!["b", "c"]);
}

#[tokio::test]
async fn deadline_bounds_the_batch() {
    let sink = RecordingSink {
        delay: Some(Duration::from_millis(200)),
        ..Default::default()
    };
    let report = push_all(&sink, &batch(), Instant::now() + Duration::from_millis(50)).await;

    assert_eq!(report.sent, 0);
    assert_eq!(report.failed.len(), 3);
}

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use mymetrics_core::{MetricKind, MetricValue, MetricsError};
use mymetrics_server::storage::{MemStorage, Storage};

#[test]
fn counters_accumulate() {
    let s = MemStorage::new();
    let deltas = [5, 7, -3, 11];
    let mut running = 0;
    for d in deltas {
        running += d;
        let got = s.store_and_get("hits", MetricValue::Counter(d)).unwrap();
        assert_eq!(got, MetricValue::Counter(running));
    }
    assert_eq!(s.get("hits", MetricKind::Counter).unwrap(), MetricValue::Counter(20));
}

#[test]
fn gauges_replace() {
    let s = MemStorage::new();
    for v in [1.5, -2.0, 36.6] {
        assert_eq!(s.store_and_get("temp", MetricValue::Gauge(v)).unwrap(), MetricValue::Gauge(v));
    }
    assert_eq!(s.get("temp", MetricKind::Gauge).unwrap(), MetricValue::Gauge(36.6));
}

#[test]
fn same_name_different_kinds_are_independent() {
    let s = MemStorage::new();
    s.store("x", MetricValue::Counter(3)).unwrap();
    s.store("x", MetricValue::Gauge(0.5)).unwrap();

    assert_eq!(s.get("x", MetricKind::Counter).unwrap(), MetricValue::Counter(3));
    assert_eq!(s.get("x", MetricKind::Gauge).unwrap(), MetricValue::Gauge(0.5));
}

#[test]
fn missing_record_is_not_found() {
    let s = MemStorage::new();
    s.store("present", MetricValue::Gauge(1.0)).unwrap();

    let err = s.get("missing", MetricKind::Counter).expect_err("must fail");
    assert!(matches!(err, MetricsError::NotFound { kind: MetricKind::Counter, .. }));
    assert_eq!(err.class().as_str(), "NOT_FOUND");

    assert!(s.get("present", MetricKind::Counter).is_err());
}

#[test]
fn overflow_leaves_state_untouched() {
    let s = MemStorage::new();
    s.store("big", MetricValue::Counter(i64::MAX - 1)).unwrap();

    let err = s.store("big", MetricValue::Counter(2)).expect_err("must overflow");
    assert!(matches!(err, MetricsError::BadValue(_)));
    assert_eq!(s.get("big", MetricKind::Counter).unwrap(), MetricValue::Counter(i64::MAX - 1));
}

#[test]
fn list_groups_names_by_kind() {
    let s = MemStorage::new();
    assert_eq!(s.list().unwrap()[&MetricKind::Counter], Vec::<String>::new());
    assert_eq!(s.list().unwrap()[&MetricKind::Gauge], Vec::<String>::new());

    s.store("b", MetricValue::Counter(1)).unwrap();
    s.store("a", MetricValue::Counter(1)).unwrap();
    s.store("g", MetricValue::Gauge(1.0)).unwrap();

    let list = s.list().unwrap();
    assert_eq!(list[&MetricKind::Counter], vec!["a".to_string(), "b".to_string()]);
    assert_eq!(list[&MetricKind::Gauge], vec!["g".to_string()]);
}

#[test]
fn concurrent_increments_are_not_lost() {
    let s = Arc::new(MemStorage::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let s = Arc::clone(&s);
            thread::spawn(move || {
                for _ in 0..1000 {
                    s.store("hits", MetricValue::Counter(1)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(s.get("hits", MetricKind::Counter).unwrap(), MetricValue::Counter(8000));
}

//! Push side: one request per snapshot entry.
//!
//! Entries are independent: a failure is recorded and the rest are still
//! attempted. The batch shares one deadline; entries not finished by then are
//! reported as failed.

use std::collections::HashMap;

use tokio::time::Instant;

use mymetrics_core::{MetricValue, MetricsError};

use crate::sink::MetricSink;

#[derive(Debug, Default)]
pub struct PushReport {
    pub sent: usize,
    pub failed: Vec<(String, MetricsError)>,
}

impl PushReport {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

pub async fn push_all(
    sink: &dyn MetricSink,
    values: &HashMap<String, MetricValue>,
    deadline: Instant,
) -> PushReport {
    let mut names: Vec<&String> = values.keys().collect();
    names.sort();

    let mut report = PushReport::default();
    for name in names {
        let value = values[name];
        let res = match tokio::time::timeout_at(deadline, sink.send(name, value)).await {
            Ok(res) => res,
            Err(_) => Err(MetricsError::Io("push deadline exceeded".into())),
        };
        match res {
            Ok(()) => report.sent += 1,
            Err(e) => report.failed.push((name.clone(), e)),
        }
    }
    report
}

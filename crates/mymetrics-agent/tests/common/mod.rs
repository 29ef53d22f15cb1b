//! Fake source and sink for agent tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use mymetrics_agent::{MetricSink, MetricsSource};
use mymetrics_core::{MetricValue, MetricsError, Result};

pub struct FakeSource {
    pub readings: Vec<(&'static str, f64)>,
}

impl MetricsSource for FakeSource {
    fn sample(&mut self) -> Vec<(&'static str, f64)> {
        self.readings.clone()
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<(String, MetricValue)>>,
    pub fail_on: Vec<&'static str>,
    pub delay: Option<Duration>,
}

impl RecordingSink {
    pub fn names(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }
}

#[async_trait]
impl MetricSink for RecordingSink {
    async fn send(&self, name: &str, value: MetricValue) -> Result<()> {
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        if self.fail_on.contains(&name) {
            return Err(MetricsError::Io(format!("refused {name}")));
        }
        self.sent.lock().unwrap().push((name.to_string(), value));
        Ok(())
    }
}

pub fn shared(sink: RecordingSink) -> Arc<RecordingSink> {
    Arc::new(sink)
}

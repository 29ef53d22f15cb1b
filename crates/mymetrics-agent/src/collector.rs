//! Collect side: samples into the shared snapshot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mymetrics_core::MetricValue;

use crate::source::MetricsSource;

/// Counter: number of polls since the agent started.
pub const POLL_COUNT: &str = "PollCount";
/// Gauge: fresh uniform sample in `[0, 1)` on every poll.
pub const RANDOM_VALUE: &str = "RandomValue";

/// Latest value per metric name, shared between the two loops.
#[derive(Clone, Default)]
pub struct Snapshot {
    values: Arc<Mutex<HashMap<String, MetricValue>>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    // Writers only overwrite whole entries, so a poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, MetricValue>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, name: &str, value: MetricValue) {
        self.lock().insert(name.to_string(), value);
    }

    /// Owned copy, so the lock is never held across network calls.
    pub fn copy(&self) -> HashMap<String, MetricValue> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

pub struct Collector {
    source: Box<dyn MetricsSource>,
    snapshot: Snapshot,
    polls: i64,
}

impl Collector {
    pub fn new(source: Box<dyn MetricsSource>, snapshot: Snapshot) -> Self {
        Self {
            source,
            snapshot,
            polls: 0,
        }
    }

    pub fn polls(&self) -> i64 {
        self.polls
    }

    /// Sample once and overwrite the matching snapshot entries.
    pub fn poll(&mut self) {
        let readings = self.source.sample();
        self.polls += 1;
        let random = rand::random::<f64>();

        let mut values = self.snapshot.lock();
        values.insert(POLL_COUNT.to_string(), MetricValue::Counter(self.polls));
        values.insert(RANDOM_VALUE.to_string(), MetricValue::Gauge(random));
        for (name, reading) in readings {
            match MetricValue::gauge(reading) {
                Ok(v) => {
                    values.insert(name.to_string(), v);
                }
                Err(e) => tracing::debug!(metric = name, error = %e, "skipping reading"),
            }
        }
    }
}

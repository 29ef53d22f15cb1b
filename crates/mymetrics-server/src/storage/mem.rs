use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use mymetrics_core::{MetricKind, MetricValue, MetricsError, Result};

use super::{MetricList, Storage};

/// The two maps owned by a storage engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricMaps {
    pub counters: HashMap<String, i64>,
    pub gauges: HashMap<String, f64>,
}

impl MetricMaps {
    pub fn get(&self, name: &str, kind: MetricKind) -> Result<MetricValue> {
        let found = match kind {
            MetricKind::Counter => self.counters.get(name).copied().map(MetricValue::Counter),
            MetricKind::Gauge => self.gauges.get(name).copied().map(MetricValue::Gauge),
        };
        found.ok_or_else(|| MetricsError::not_found(kind, name))
    }

    pub fn list(&self) -> MetricList {
        let mut counters: Vec<String> = self.counters.keys().cloned().collect();
        let mut gauges: Vec<String> = self.gauges.keys().cloned().collect();
        counters.sort();
        gauges.sort();

        let mut out = MetricList::new();
        out.insert(MetricKind::Counter, counters);
        out.insert(MetricKind::Gauge, gauges);
        out
    }

    /// Read-modify-write for one record. Caller holds the lock.
    pub fn store_and_get(&mut self, name: &str, value: MetricValue) -> Result<MetricValue> {
        match value {
            MetricValue::Counter(delta) => {
                let current = self.counters.get(name).copied().unwrap_or(0);
                let total = current.checked_add(delta).ok_or_else(|| {
                    MetricsError::BadValue(format!(
                        "counter {name:?} overflows: {current} + {delta}"
                    ))
                })?;
                self.counters.insert(name.to_string(), total);
                Ok(MetricValue::Counter(total))
            }
            MetricValue::Gauge(v) => {
                self.gauges.insert(name.to_string(), v);
                Ok(MetricValue::Gauge(v))
            }
        }
    }

    /// Put a record back to `previous` (absent when `None`).
    pub(crate) fn restore_entry(&mut self, name: &str, kind: MetricKind, previous: Option<MetricValue>) {
        match (kind, previous) {
            (MetricKind::Counter, Some(MetricValue::Counter(v))) => {
                self.counters.insert(name.to_string(), v);
            }
            (MetricKind::Gauge, Some(MetricValue::Gauge(v))) => {
                self.gauges.insert(name.to_string(), v);
            }
            (MetricKind::Counter, _) => {
                self.counters.remove(name);
            }
            (MetricKind::Gauge, _) => {
                self.gauges.remove(name);
            }
        }
    }
}

/// In-memory storage engine guarded by a single lock.
#[derive(Debug, Default)]
pub struct MemStorage {
    maps: Mutex<MetricMaps>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_maps(maps: MetricMaps) -> Self {
        Self {
            maps: Mutex::new(maps),
        }
    }

    /// Acquire the engine lock. Decorators reuse it so a read-modify-write
    /// and the flush that follows observe one consistent state.
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, MetricMaps>> {
        self.maps
            .lock()
            .map_err(|_| MetricsError::Internal("metric storage lock poisoned".into()))
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Result<MetricMaps> {
        Ok(self.lock()?.clone())
    }
}

impl Storage for MemStorage {
    fn get(&self, name: &str, kind: MetricKind) -> Result<MetricValue> {
        self.lock()?.get(name, kind)
    }

    fn list(&self) -> Result<MetricList> {
        Ok(self.lock()?.list())
    }

    fn store_and_get(&self, name: &str, value: MetricValue) -> Result<MetricValue> {
        self.lock()?.store_and_get(name, value)
    }
}

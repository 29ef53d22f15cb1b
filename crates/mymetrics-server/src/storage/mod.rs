//! Metric storage.
//!
//! - [`MemStorage`]: process-local engine, counters accumulate, gauges replace.
//! - [`FileStorage`]: wraps a `MemStorage` and persists full-state JSON
//!   snapshots, immediately or on a debounced timer.
//!
//! Both sit behind the [`Storage`] trait so handlers never know which one
//! they talk to.

pub mod file;
pub mod mem;

use std::collections::BTreeMap;

use mymetrics_core::{MetricKind, MetricValue, Result};

pub use file::{FileStorage, FlushState};
pub use mem::{MemStorage, MetricMaps};

/// Known names grouped by kind. Both kinds are always present.
pub type MetricList = BTreeMap<MetricKind, Vec<String>>;

/// Storage contract shared by the in-memory and durable engines.
///
/// All operations are atomic with respect to each other; concurrent
/// `store` calls on one counter never lose an increment.
pub trait Storage: Send + Sync {
    /// Current value of `(name, kind)`, or `NotFound`.
    fn get(&self, name: &str, kind: MetricKind) -> Result<MetricValue>;

    /// All known names grouped by kind (order is not significant).
    fn list(&self) -> Result<MetricList>;

    /// Accumulate (counter) or replace (gauge), returning the stored result.
    ///
    /// For a counter this is the new running total, not the delta.
    fn store_and_get(&self, name: &str, value: MetricValue) -> Result<MetricValue>;

    fn store(&self, name: &str, value: MetricValue) -> Result<()> {
        self.store_and_get(name, value).map(|_| ())
    }
}

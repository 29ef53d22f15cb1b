//! Durable storage decorator.
//!
//! Wraps a [`MemStorage`] and keeps a JSON snapshot of the full state on disk:
//!
//! - `store_interval == 0`: every write flushes before returning, and the write
//!   is rolled back if the flush fails.
//! - `store_interval > 0`: the first write after a flush arms a one-shot timer;
//!   later writes leave it alone, so flush lag is bounded by the interval.
//!   Timer flushes are best-effort and only logged on failure.
//!
//! Snapshots are written to `<path>.tmp` and renamed over `<path>`, so readers
//! see either the old or the new file, never a partial one.
//!
//! Once closed, every operation fails with `ClosedStorage`.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::time::Instant;

use mymetrics_core::{MetricKind, MetricValue, MetricsError, Result};

use super::mem::{MemStorage, MetricMaps};
use super::{MetricList, Storage};

/// Debounce state of one storage instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushState {
    Idle,
    PendingFlush { deadline: Instant },
}

/// On-disk layout: `{"Counters": {...}, "Gauges": {...}}`.
#[derive(Serialize)]
struct SnapshotOut<'a> {
    #[serde(rename = "Counters")]
    counters: &'a HashMap<String, i64>,
    #[serde(rename = "Gauges")]
    gauges: &'a HashMap<String, f64>,
}

#[derive(Deserialize)]
struct SnapshotIn {
    #[serde(rename = "Counters", default)]
    counters: Option<HashMap<String, i64>>,
    #[serde(rename = "Gauges", default)]
    gauges: Option<HashMap<String, f64>>,
}

#[derive(Clone)]
pub struct FileStorage {
    inner: Arc<FileStorageInner>,
}

struct FileStorageInner {
    mem: MemStorage,
    path: PathBuf,
    store_interval: Duration,
    closed: AtomicBool,
    // Lock order: `mem` first, then `flush_state`.
    flush_state: Mutex<FlushState>,
    runtime: Option<Handle>,
}

impl FileStorage {
    /// Create an empty durable storage.
    ///
    /// Debounced flushing (`store_interval > 0`) runs on the tokio runtime
    /// that is current at construction time.
    pub fn new(path: impl Into<PathBuf>, store_interval: Duration) -> Self {
        Self {
            inner: Arc::new(FileStorageInner {
                mem: MemStorage::new(),
                path: path.into(),
                store_interval,
                closed: AtomicBool::new(false),
                flush_state: Mutex::new(FlushState::Idle),
                runtime: Handle::try_current().ok(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn flush_state(&self) -> Result<FlushState> {
        Ok(*self.inner.lock_flush_state()?)
    }

    /// Mark the storage closed. Idempotent; does not flush.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!(path = %self.inner.path.display(), "file storage closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Result<MetricMaps> {
        let maps = self.inner.mem.lock()?;
        self.inner.ensure_open()?;
        Ok(maps.clone())
    }

    /// Write the full current state to the snapshot file.
    pub fn flush(&self) -> Result<()> {
        let maps = self.inner.mem.lock()?;
        self.inner.ensure_open()?;
        write_snapshot(&self.inner.path, &maps)
    }

    /// Replace the in-memory state with the snapshot file's content.
    ///
    /// `{}` is a valid, empty snapshot. Anything unreadable fails outright.
    pub fn load(&self) -> Result<()> {
        self.inner.ensure_open()?;
        let path = &self.inner.path;
        let raw = fs::read(path).map_err(|e| {
            MetricsError::Io(format!("failed to read snapshot {}: {e}", path.display()))
        })?;
        let stored: SnapshotIn = serde_json::from_slice(&raw).map_err(|e| {
            MetricsError::Io(format!("failed to decode snapshot {}: {e}", path.display()))
        })?;

        let maps = MetricMaps {
            counters: stored.counters.unwrap_or_default(),
            gauges: stored.gauges.unwrap_or_default(),
        };
        tracing::info!(
            path = %path.display(),
            counters = maps.counters.len(),
            gauges = maps.gauges.len(),
            "snapshot loaded"
        );
        *self.inner.mem.lock()? = maps;
        Ok(())
    }

    /// Arm the one-shot flush timer unless one is already pending.
    /// Caller holds the `mem` lock.
    fn schedule_flush(&self) -> Result<()> {
        let mut state = self.inner.lock_flush_state()?;
        if let FlushState::PendingFlush { .. } = *state {
            return Ok(());
        }

        let runtime = self.inner.runtime.as_ref().ok_or_else(|| {
            MetricsError::Internal("debounced flush requires a tokio runtime".into())
        })?;

        let deadline = Instant::now() + self.inner.store_interval;
        *state = FlushState::PendingFlush { deadline };

        let inner = Arc::clone(&self.inner);
        runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let path = inner.path.clone();
            // Lock wait, file write and fsync stay off the async workers.
            let res = tokio::task::spawn_blocking(move || inner.flush_due())
                .await
                .unwrap_or_else(|e| Err(MetricsError::Internal(format!("flush task failed: {e}"))));
            match res {
                Ok(()) => tracing::debug!(path = %path.display(), "debounced flush done"),
                Err(MetricsError::ClosedStorage) => {}
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "debounced flush failed"
                ),
            }
        });
        Ok(())
    }
}

impl FileStorageInner {
    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(MetricsError::ClosedStorage);
        }
        Ok(())
    }

    fn lock_flush_state(&self) -> Result<MutexGuard<'_, FlushState>> {
        self.flush_state
            .lock()
            .map_err(|_| MetricsError::Internal("flush state lock poisoned".into()))
    }

    /// Timer callback: back to `Idle`, then flush what is there now.
    fn flush_due(&self) -> Result<()> {
        let maps = self.mem.lock()?;
        *self.lock_flush_state()? = FlushState::Idle;
        self.ensure_open()?;
        write_snapshot(&self.path, &maps)
    }
}

impl Storage for FileStorage {
    fn get(&self, name: &str, kind: MetricKind) -> Result<MetricValue> {
        let maps = self.inner.mem.lock()?;
        self.inner.ensure_open()?;
        maps.get(name, kind)
    }

    fn list(&self) -> Result<MetricList> {
        let maps = self.inner.mem.lock()?;
        self.inner.ensure_open()?;
        Ok(maps.list())
    }

    fn store_and_get(&self, name: &str, value: MetricValue) -> Result<MetricValue> {
        let mut maps = self.inner.mem.lock()?;
        self.inner.ensure_open()?;

        let kind = value.kind();
        let previous = maps.get(name, kind).ok();
        let stored = maps.store_and_get(name, value)?;

        let persisted = if self.inner.store_interval.is_zero() {
            write_snapshot(&self.inner.path, &maps)
        } else {
            self.schedule_flush()
        };
        if let Err(e) = persisted {
            maps.restore_entry(name, kind, previous);
            return Err(e);
        }
        Ok(stored)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(".tmp");
    PathBuf::from(s)
}

/// Serialize both maps and swap them into place via `<path>.tmp`.
fn write_snapshot(path: &Path, maps: &MetricMaps) -> Result<()> {
    let content = serde_json::to_vec(&SnapshotOut {
        counters: &maps.counters,
        gauges: &maps.gauges,
    })
    .map_err(|e| MetricsError::Internal(format!("failed to encode snapshot: {e}")))?;

    let tmp = tmp_path(path);
    write_private(&tmp, &content)
        .map_err(|e| MetricsError::Io(format!("failed to write {}: {e}", tmp.display())))?;
    fs::rename(&tmp, path).map_err(|e| {
        MetricsError::Io(format!(
            "failed to rename {} to {}: {e}",
            tmp.display(),
            path.display()
        ))
    })?;

    tracing::debug!(
        path = %path.display(),
        counters = maps.counters.len(),
        gauges = maps.gauges.len(),
        bytes = content.len(),
        "snapshot written"
    );
    Ok(())
}

fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut opts = fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut f = opts.open(path)?;
    f.write_all(content)?;
    f.sync_all()
}

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use mymetrics_core::{MetricsError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,

    /// Seconds between debounced snapshot flushes; `0` flushes on every write.
    #[serde(default = "default_store_interval_secs")]
    pub store_interval_secs: u64,

    #[serde(default = "default_file_storage_path")]
    pub file_storage_path: PathBuf,

    /// Load the snapshot file at startup when it exists.
    #[serde(default = "default_restore")]
    pub restore: bool,

    /// How long in-flight requests may run after a shutdown signal.
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            store_interval_secs: default_store_interval_secs(),
            file_storage_path: default_file_storage_path(),
            restore: default_restore(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(MetricsError::InvalidConfig("address must not be empty".into()));
        }
        if self.file_storage_path.as_os_str().is_empty() {
            return Err(MetricsError::InvalidConfig(
                "file_storage_path must not be empty".into(),
            ));
        }
        if self.shutdown_grace_ms == 0 {
            return Err(MetricsError::InvalidConfig(
                "shutdown_grace_ms must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn store_interval(&self) -> Duration {
        Duration::from_secs(self.store_interval_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

fn default_address() -> String {
    "localhost:8080".into()
}
fn default_store_interval_secs() -> u64 {
    300
}
fn default_file_storage_path() -> PathBuf {
    PathBuf::from("/tmp/metrics-db.json")
}
fn default_restore() -> bool {
    true
}
fn default_shutdown_grace_ms() -> u64 {
    5000
}

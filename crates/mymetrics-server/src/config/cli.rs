//! Command line flags with environment fallbacks, layered over the YAML file.

use std::path::PathBuf;

use clap::Parser;

use mymetrics_core::{MetricsError, Result};

use super::{load_from_file, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "mymetrics-server", about = "Collects counter and gauge metrics over HTTP")]
pub struct ServerArgs {
    /// Optional YAML config file; flags and env override its values.
    #[arg(short = 'c', long, env = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address.
    #[arg(short = 'a', long, env = "ADDRESS")]
    pub address: Option<String>,

    /// Snapshot flush interval in seconds (`0` = flush on every write, `10s` accepted).
    #[arg(short = 'i', long, env = "STORE_INTERVAL", value_parser = parse_seconds)]
    pub store_interval: Option<u64>,

    /// Snapshot file path.
    #[arg(short = 'f', long, env = "FILE_STORAGE_PATH")]
    pub file_storage_path: Option<PathBuf>,

    /// Restore state from the snapshot file at startup.
    #[arg(short = 'r', long, env = "RESTORE")]
    pub restore: Option<bool>,
}

impl ServerArgs {
    pub fn resolve(self) -> Result<ServerConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_from_file(path)?,
            None => ServerConfig::default(),
        };
        if let Some(v) = self.address {
            cfg.address = v;
        }
        if let Some(v) = self.store_interval {
            cfg.store_interval_secs = v;
        }
        if let Some(v) = self.file_storage_path {
            cfg.file_storage_path = v;
        }
        if let Some(v) = self.restore {
            cfg.restore = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Whole seconds, with an optional `s` suffix (`300`, `10s`).
pub fn parse_seconds(s: &str) -> Result<u64> {
    let trimmed = s.trim();
    let digits = trimmed.strip_suffix('s').unwrap_or(trimmed);
    digits
        .parse::<u64>()
        .map_err(|e| MetricsError::InvalidConfig(format!("{s:?} is not a number of seconds: {e}")))
}

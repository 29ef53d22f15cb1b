//! Server config loader (strict parsing) and CLI/env overlay.

pub mod cli;
pub mod schema;

use std::fs;
use std::path::Path;

use mymetrics_core::{MetricsError, Result};

pub use cli::{parse_seconds, ServerArgs};
pub use schema::ServerConfig;

pub fn load_from_file(path: &Path) -> Result<ServerConfig> {
    let s = fs::read_to_string(path).map_err(|e| {
        MetricsError::InvalidConfig(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

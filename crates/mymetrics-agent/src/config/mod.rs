//! Agent config loader (strict parsing) and CLI/env overlay.

pub mod cli;
pub mod schema;

use std::fs;
use std::path::Path;

use mymetrics_core::{MetricsError, Result};

pub use cli::AgentArgs;
pub use schema::AgentConfig;

pub fn load_from_file(path: &Path) -> Result<AgentConfig> {
    let s = fs::read_to_string(path).map_err(|e| {
        MetricsError::InvalidConfig(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AgentConfig> {
    let cfg: AgentConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

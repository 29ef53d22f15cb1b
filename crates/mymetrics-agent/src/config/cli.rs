//! Command line flags with environment fallbacks, layered over the YAML file.

use std::path::PathBuf;

use clap::Parser;

use mymetrics_core::Result;

use super::{load_from_file, AgentConfig};

#[derive(Debug, Parser)]
#[command(name = "mymetrics-agent", about = "Samples process metrics and reports them to a mymetrics server")]
pub struct AgentArgs {
    /// Optional YAML config file; flags and env override its values.
    #[arg(short = 'c', long, env = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Server address.
    #[arg(short = 'a', long, env = "ADDRESS")]
    pub address: Option<String>,

    /// Poll interval in seconds.
    #[arg(short = 'p', long, env = "POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Report interval in seconds.
    #[arg(short = 'r', long, env = "REPORT_INTERVAL")]
    pub report_interval: Option<u64>,
}

impl AgentArgs {
    pub fn resolve(self) -> Result<AgentConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_from_file(path)?,
            None => AgentConfig::default(),
        };
        if let Some(v) = self.address {
            cfg.address = v;
        }
        if let Some(v) = self.poll_interval {
            cfg.poll_interval_secs = v;
        }
        if let Some(v) = self.report_interval {
            cfg.report_interval_secs = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

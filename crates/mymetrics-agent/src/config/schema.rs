use std::time::Duration;

use serde::Deserialize;

use mymetrics_core::{MetricsError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Server address; `http://` is assumed when no scheme is given.
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            poll_interval_secs: default_poll_interval_secs(),
            report_interval_secs: default_report_interval_secs(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(MetricsError::InvalidConfig("address must not be empty".into()));
        }
        if self.poll_interval_secs == 0 {
            return Err(MetricsError::InvalidConfig(
                "poll_interval_secs must be greater than 0".into(),
            ));
        }
        if self.report_interval_secs == 0 {
            return Err(MetricsError::InvalidConfig(
                "report_interval_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Base URL of the server, scheme included.
    pub fn endpoint(&self) -> String {
        let address = self.address.trim().trim_end_matches('/');
        if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }
}

fn default_address() -> String {
    "localhost:8080".into()
}
fn default_poll_interval_secs() -> u64 {
    2
}
fn default_report_interval_secs() -> u64 {
    10
}

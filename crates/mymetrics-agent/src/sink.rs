//! Push transport.

use std::time::Duration;

use async_trait::async_trait;

use mymetrics_core::protocol::path::update_url;
use mymetrics_core::{MetricValue, MetricsError, Result};

/// Delivers one metric to the collecting server.
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn send(&self, name: &str, value: MetricValue) -> Result<()>;
}

/// `POST {endpoint}/update/{kind}/{name}/{value}`, one request per metric.
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| MetricsError::Internal(format!("http client init failed: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MetricSink for HttpSink {
    async fn send(&self, name: &str, value: MetricValue) -> Result<()> {
        let url = update_url(&self.endpoint, name, &value);
        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .send()
            .await
            .map_err(|e| MetricsError::Io(format!("failed to post {url}: {e}")))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(MetricsError::Io(format!("bad response status {status} for {url}")));
        }
        Ok(())
    }
}

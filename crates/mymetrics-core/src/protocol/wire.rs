//! Wire Metric (JSON form).
//!
//! `{ "id": "...", "type": "counter"|"gauge", "delta": i64?, "value": f64? }`
//!
//! For a counter exactly `delta` is populated, for a gauge exactly `value`.

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};
use crate::metric::{MetricKind, MetricValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMetric {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MetricKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl WireMetric {
    /// Read request: only `id`/`type` populated.
    pub fn query(id: impl Into<String>, kind: MetricKind) -> Self {
        Self {
            id: id.into(),
            kind,
            delta: None,
            value: None,
        }
    }

    /// Response or write request carrying a resolved value.
    pub fn with_value(id: impl Into<String>, value: MetricValue) -> Self {
        let mut m = Self::query(id, value.kind());
        match value {
            MetricValue::Counter(v) => m.delta = Some(v),
            MetricValue::Gauge(v) => m.value = Some(v),
        }
        m
    }

    /// Validate a write request and extract the typed value.
    ///
    /// The field matching `type` must be present and the other one absent.
    pub fn to_value(&self) -> Result<MetricValue> {
        self.ensure_id()?;
        match (self.kind, self.delta, self.value) {
            (MetricKind::Counter, Some(d), None) => Ok(MetricValue::Counter(d)),
            (MetricKind::Gauge, None, Some(v)) => MetricValue::gauge(v),
            (MetricKind::Counter, None, _) => Err(MetricsError::BadRequest(
                "counter metric has no delta value".into(),
            )),
            (MetricKind::Gauge, _, None) => Err(MetricsError::BadRequest(
                "gauge metric has no value".into(),
            )),
            (kind, _, _) => Err(MetricsError::BadRequest(format!(
                "{kind} metric must carry exactly one of delta/value"
            ))),
        }
    }

    /// Validate a read request: `delta`/`value` must be empty.
    pub fn ensure_query(&self) -> Result<()> {
        self.ensure_id()?;
        if self.delta.is_some() || self.value.is_some() {
            return Err(MetricsError::BadRequest(
                "value request must not carry delta or value".into(),
            ));
        }
        Ok(())
    }

    // The path form cannot address an empty name.
    fn ensure_id(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(MetricsError::BadRequest("metric id must not be empty".into()));
        }
        Ok(())
    }
}

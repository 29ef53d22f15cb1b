//! Metric kinds and typed values.
//!
//! A counter carries an `i64` and accumulates; a gauge carries an `f64` and
//! replaces. The kind is carried by the value variant itself, so a payload can
//! never disagree with its kind once it has been parsed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// The two supported metric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    /// All kinds, in listing order.
    pub const ALL: [MetricKind; 2] = [MetricKind::Counter, MetricKind::Gauge];

    /// Wire name (`counter` / `gauge`).
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "counter" => Ok(MetricKind::Counter),
            "gauge" => Ok(MetricKind::Gauge),
            other => Err(MetricsError::UnknownMetricKind(other.to_string())),
        }
    }
}

/// A typed metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Counter(i64),
    Gauge(f64),
}

impl MetricValue {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Counter(_) => MetricKind::Counter,
            MetricValue::Gauge(_) => MetricKind::Gauge,
        }
    }

    /// Parse the textual form of a value according to `kind`.
    ///
    /// Counters must be base-10 `i64`; gauges must be finite `f64`.
    pub fn parse(kind: MetricKind, raw: &str) -> Result<Self> {
        match kind {
            MetricKind::Counter => raw
                .parse::<i64>()
                .map(MetricValue::Counter)
                .map_err(|e| MetricsError::BadValue(format!("{raw:?} is not a counter value: {e}"))),
            MetricKind::Gauge => {
                let v = raw
                    .parse::<f64>()
                    .map_err(|e| MetricsError::BadValue(format!("{raw:?} is not a gauge value: {e}")))?;
                MetricValue::gauge(v)
            }
        }
    }

    /// Build a gauge, rejecting NaN and infinities (they have no JSON form).
    pub fn gauge(v: f64) -> Result<Self> {
        if v.is_finite() {
            Ok(MetricValue::Gauge(v))
        } else {
            Err(MetricsError::BadValue(format!("gauge value must be finite, got {v}")))
        }
    }

    pub fn as_counter(&self) -> Option<i64> {
        match self {
            MetricValue::Counter(v) => Some(*v),
            MetricValue::Gauge(_) => None,
        }
    }

    pub fn as_gauge(&self) -> Option<f64> {
        match self {
            MetricValue::Gauge(v) => Some(*v),
            MetricValue::Counter(_) => None,
        }
    }
}

/// Default text rendering: `12`, `36.6`, `2` (shortest round-trip form).
impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Counter(v) => write!(f, "{v}"),
            MetricValue::Gauge(v) => write!(f, "{v}"),
        }
    }
}

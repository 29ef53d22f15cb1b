//! Shared error type across mymetrics crates.

use thiserror::Error;

use crate::metric::MetricKind;

/// Client-facing error classes (stable API).
///
/// The HTTP layer maps these one-to-one onto status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed input, unknown kind, missing field.
    BadRequest,
    /// Read of an absent record.
    NotFound,
    /// Storage, IO, or other server-side failure.
    Internal,
}

impl ErrorClass {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::BadRequest => "BAD_REQUEST",
            ErrorClass::NotFound => "NOT_FOUND",
            ErrorClass::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core, server, and agent.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("unknown metric type: {0:?}")]
    UnknownMetricKind(String),
    #[error("bad value: {0}")]
    BadValue(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("metric not found: {kind}/{name}")]
    NotFound { kind: MetricKind, name: String },
    #[error("storage is closed")]
    ClosedStorage,
    #[error("io failure: {0}")]
    Io(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map internal error to a stable client-facing class.
    pub fn class(&self) -> ErrorClass {
        match self {
            MetricsError::UnknownMetricKind(_)
            | MetricsError::BadValue(_)
            | MetricsError::BadRequest(_)
            | MetricsError::InvalidConfig(_) => ErrorClass::BadRequest,
            MetricsError::NotFound { .. } => ErrorClass::NotFound,
            MetricsError::ClosedStorage | MetricsError::Io(_) | MetricsError::Internal(_) => {
                ErrorClass::Internal
            }
        }
    }

    /// Convenience constructor for not-found lookups.
    pub fn not_found(kind: MetricKind, name: &str) -> Self {
        MetricsError::NotFound {
            kind,
            name: name.to_string(),
        }
    }
}

//! mymetrics core: metric model, wire encodings, and the shared error surface.
//!
//! This crate defines the contracts shared by the collecting server and the
//! reporting agent: the two metric kinds and their typed values, the URL-path
//! text form, and the JSON Wire Metric. It carries no transport or runtime
//! dependencies so both sides can reuse it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `MetricsError`/`Result` so malformed client input never takes a
//! process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorClass, MetricsError, Result};
pub use metric::{MetricKind, MetricValue};

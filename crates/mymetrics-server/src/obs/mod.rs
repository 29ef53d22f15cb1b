//! Request observability.
//!
//! One structured `tracing` event per completed request.

pub mod access_log;

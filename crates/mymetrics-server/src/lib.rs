//! mymetrics server library entry.
//!
//! This crate wires the storage engine, the durable snapshot decorator, the
//! HTTP ingestion handlers, and the gzip/access-log middleware into one
//! router. It is consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod router;
pub mod server;
pub mod storage;
pub mod transport;

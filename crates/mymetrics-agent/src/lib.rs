//! mymetrics agent library entry.
//!
//! Two independent periodic loops share one mutex-guarded snapshot:
//! - collect: sample process metrics into the snapshot every poll interval
//! - push: copy the snapshot and send each entry to the server every report
//!   interval, using the URL-path form
//!
//! The metrics source and the push transport are traits so tests can swap
//! them out.

pub mod agent;
pub mod collector;
pub mod config;
pub mod pusher;
pub mod sink;
pub mod source;

pub use agent::Agent;
pub use collector::{Collector, Snapshot};
pub use pusher::{push_all, PushReport};
pub use sink::{HttpSink, MetricSink};
pub use source::{MetricsSource, SysinfoSource};

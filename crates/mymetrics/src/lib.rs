//! Top-level facade crate for mymetrics.
//!
//! Re-exports the metric model, the server library and the agent library so
//! users can depend on a single crate.

pub mod core {
    pub use mymetrics_core::*;
}

pub mod server {
    pub use mymetrics_server::*;
}

pub mod agent {
    pub use mymetrics_agent::*;
}

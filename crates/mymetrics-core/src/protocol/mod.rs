//! Wire encodings shared by server and agent.
//!
//! - Path form: `/update/{kind}/{name}/{value}` and `/value/{kind}/{name}`.
//! - JSON form: the Wire Metric object posted to `/update/` and `/value/`.
//!
//! Both forms are converted into `MetricValue` before touching storage, so
//! malformed input is rejected at the edge as `MetricsError`.

pub mod path;
pub mod wire;

/// `Content-Type` of the JSON form.
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// `Content-Type` of the listing page.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
/// `Content-Encoding` / `Accept-Encoding` token for gzip framing.
pub const GZIP_ENCODING: &str = "gzip";

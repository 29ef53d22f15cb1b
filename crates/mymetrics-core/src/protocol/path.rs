//! URL-path form.

use crate::error::Result;
use crate::metric::{MetricKind, MetricValue};

/// Decode the `{kind}` and `{value}` segments of an update path.
///
/// An unknown kind is reported before the value is looked at, so
/// `/update/bogus/x/1.5` is `UnknownMetricKind`, not `BadValue`.
pub fn parse_update(kind: &str, raw_value: &str) -> Result<MetricValue> {
    let kind: MetricKind = kind.parse()?;
    MetricValue::parse(kind, raw_value)
}

/// Build the update URL for one metric: `{endpoint}/update/{kind}/{name}/{value}`.
///
/// `name` is percent-encoded so it stays a single path segment.
pub fn update_url(endpoint: &str, name: &str, value: &MetricValue) -> String {
    format!(
        "{}/update/{}/{}/{}",
        endpoint.trim_end_matches('/'),
        value.kind(),
        urlencoding::encode(name),
        value
    )
}

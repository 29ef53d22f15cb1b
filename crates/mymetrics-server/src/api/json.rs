//! JSON form handlers (Wire Metric bodies).

use axum::{
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use mymetrics_core::protocol::{wire::WireMetric, JSON_CONTENT_TYPE};
use mymetrics_core::{MetricsError, Result};

use crate::api::ApiError;
use crate::app_state::AppState;
use crate::transport::has_media_type;

/// `POST /update/`: store and echo the post-store value.
///
/// For a counter the response carries the new running total, not the delta.
pub async fn update(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> std::result::Result<Response, ApiError> {
    let metric = decode_metric(&headers, &read_body(body)?)?;
    let value = metric.to_value()?;

    let id = metric.id.clone();
    let stored = app.with_storage(move |s| s.store_and_get(&id, value)).await?;
    Ok(json_response(&WireMetric::with_value(metric.id, stored))?)
}

/// `POST /value/`: resolve `id`/`type` to a populated Wire Metric.
pub async fn value(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> std::result::Result<Response, ApiError> {
    let metric = decode_metric(&headers, &read_body(body)?)?;
    metric.ensure_query()?;

    let (id, kind) = (metric.id.clone(), metric.kind);
    let value = app.with_storage(move |s| s.get(&id, kind)).await?;
    Ok(json_response(&WireMetric::with_value(metric.id, value))?)
}

/// Body read failures, oversized bodies included, are client errors.
fn read_body(body: std::result::Result<Bytes, BytesRejection>) -> Result<Bytes> {
    body.map_err(|e| MetricsError::BadRequest(format!("failed to read request: {}", e.body_text())))
}

fn decode_metric(headers: &HeaderMap, body: &[u8]) -> Result<WireMetric> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| has_media_type(ct, JSON_CONTENT_TYPE));
    if !is_json {
        return Err(MetricsError::BadRequest(format!(
            "accept {JSON_CONTENT_TYPE} content type only"
        )));
    }
    serde_json::from_slice(body)
        .map_err(|e| MetricsError::BadRequest(format!("invalid metric json: {e}")))
}

fn json_response(metric: &WireMetric) -> Result<Response> {
    let body = serde_json::to_vec(metric)
        .map_err(|e| MetricsError::Internal(format!("failed to encode metric: {e}")))?;
    Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response())
}

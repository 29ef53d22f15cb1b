//! URL-path form handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use mymetrics_core::{protocol::path::parse_update, MetricKind};

use crate::api::ApiError;
use crate::app_state::AppState;

/// `POST /update/{kind}/{name}/{value}` -> 200 with empty body.
pub async fn update(
    State(app): State<AppState>,
    Path((kind, name, raw)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError> {
    let value = parse_update(&kind, &raw)?;
    app.with_storage(move |s| s.store(&name, value)).await?;
    Ok(StatusCode::OK)
}

/// `GET /value/{kind}/{name}` -> the value's text form.
pub async fn value(
    State(app): State<AppState>,
    Path((kind, name)): Path<(String, String)>,
) -> Result<String, ApiError> {
    let kind: MetricKind = kind.parse()?;
    let value = app.with_storage(move |s| s.get(&name, kind)).await?;
    Ok(value.to_string())
}

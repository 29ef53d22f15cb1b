//! HTTP ingestion and retrieval handlers.
//!
//! - `GET  /`                              : plain listing grouped by kind
//! - `POST /update/{kind}/{name}/{value}`  : path form write
//! - `GET  /value/{kind}/{name}`           : path form read
//! - `POST /update/`                       : JSON form write (echoes stored value)
//! - `POST /value/`                        : JSON form read

pub mod error;
pub mod json;
pub mod path;

use std::fmt::Write;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use mymetrics_core::protocol::HTML_CONTENT_TYPE;

use crate::app_state::AppState;
use crate::storage::MetricList;

pub use error::ApiError;

pub async fn list_metrics(State(app): State<AppState>) -> Result<Response, ApiError> {
    let list = app.with_storage(|s| s.list()).await?;
    Ok(([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], render_listing(&list)).into_response())
}

/// `kind:` header, one name per line, blank line after each group.
pub fn render_listing(list: &MetricList) -> String {
    let mut out = String::new();
    for (kind, names) in list {
        let _ = writeln!(out, "{kind}:");
        for name in names {
            let _ = writeln!(out, "{name}");
        }
        out.push('\n');
    }
    out
}

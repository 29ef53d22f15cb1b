//! Axum router wiring.
//!
//! Layers, outermost first: access log, response compression, request
//! decompression. Extracted bodies share the inflate ceiling.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{api, app_state::AppState, obs, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::list_metrics))
        .route("/update/", post(api::json::update))
        .route("/update/:kind/:name/:value", post(api::path::update))
        .route("/value/", post(api::json::value))
        .route("/value/:kind/:name", get(api::path::value))
        .layer(DefaultBodyLimit::max(transport::gzip::MAX_BODY_BYTES))
        .layer(middleware::from_fn(transport::gzip::decompress_request))
        .layer(middleware::from_fn(transport::gzip::compress_response))
        .layer(middleware::from_fn(obs::access_log::access_log))
        .with_state(state)
}

use std::time::Instant;

use axum::{body::HttpBody, extract::Request, middleware::Next, response::Response};

/// Log method, uri, status, duration, and response size for each request.
///
/// Installed outermost, so the size is the one put on the wire (after gzip).
pub async fn access_log(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let resp = next.run(req).await;

    let response_size = resp.body().size_hint().exact();
    tracing::info!(
        %method,
        %uri,
        status = resp.status().as_u16(),
        duration = ?start.elapsed(),
        response_size = ?response_size,
        "server response"
    );
    resp
}

//! Gzip framing middleware.
//!
//! - Request side: `Content-Encoding: gzip` bodies are inflated before the
//!   handler runs and the header is stripped. A corrupt stream is a 400.
//! - Response side: when the caller accepts gzip and the content type is on
//!   the allow-list, the buffered body is compressed and `Content-Encoding`
//!   is set. A compression failure is a 500 and no part of the uncompressed body
//!   is sent.

use std::io::{self, Read, Write};

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

use mymetrics_core::protocol::{GZIP_ENCODING, HTML_CONTENT_TYPE, JSON_CONTENT_TYPE};

use super::has_media_type;

/// Upper bound for a request body, before and after inflating.
pub const MAX_BODY_BYTES: usize = 4 << 20;

/// Content types worth compressing.
const COMPRESSIBLE: [&str; 3] = [JSON_CONTENT_TYPE, HTML_CONTENT_TYPE, "text/plain"];

pub async fn decompress_request(req: Request, next: Next) -> Response {
    if !is_gzip_encoded(req.headers()) {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();
    let compressed = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read gzip request body");
            return (StatusCode::BAD_REQUEST, "failed to read request").into_response();
        }
    };
    let inflated = match gunzip(&compressed) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "malformed gzip request body");
            return (StatusCode::BAD_REQUEST, "failed to read request").into_response();
        }
    };

    parts.headers.remove(header::CONTENT_ENCODING);
    parts.headers.remove(header::CONTENT_LENGTH);
    next.run(Request::from_parts(parts, Body::from(inflated))).await
}

pub async fn compress_response(req: Request, next: Next) -> Response {
    let accepts = accepts_gzip(req.headers());
    let resp = next.run(req).await;
    if !accepts || !is_compressible(resp.headers()) {
        return resp;
    }

    let (mut parts, body) = resp.into_parts();
    let raw = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(error = %e, "failed to buffer response");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to compress response").into_response();
        }
    };
    let compressed = match gzip(&raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "failed to compress response");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to compress response").into_response();
        }
    };

    parts
        .headers
        .insert(header::CONTENT_ENCODING, HeaderValue::from_static(GZIP_ENCODING));
    parts.headers.remove(header::CONTENT_LENGTH);
    parts
        .headers
        .append(header::VARY, HeaderValue::from_static("accept-encoding"));
    Response::from_parts(parts, Body::from(compressed))
}

/// `Accept-Encoding` lists `gzip` with a non-zero quality.
pub fn accepts_gzip(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|item| {
            let mut params = item.split(';');
            let coding = params.next().unwrap_or_default().trim();
            coding.eq_ignore_ascii_case(GZIP_ENCODING) && !params.any(is_zero_quality)
        })
}

fn is_zero_quality(param: &str) -> bool {
    let Some((k, v)) = param.split_once('=') else {
        return false;
    };
    k.trim().eq_ignore_ascii_case("q") && v.trim().parse::<f32>().is_ok_and(|q| q == 0.0)
}

fn is_gzip_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case(GZIP_ENCODING))
}

fn is_compressible(headers: &HeaderMap) -> bool {
    if headers.contains_key(header::CONTENT_ENCODING) {
        return false;
    }
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| COMPRESSIBLE.iter().any(|allowed| has_media_type(ct, allowed)))
}

fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data)?;
    enc.finish()
}

fn gunzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(data)
        .take(MAX_BODY_BYTES as u64 + 1)
        .read_to_end(&mut out)?;
    if out.len() > MAX_BODY_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "inflated body exceeds limit",
        ));
    }
    Ok(out)
}

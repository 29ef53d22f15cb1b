//! Transport framing applied around the handlers.
//!
//! Gzip request decompression and response compression live here; both are
//! independent `axum::middleware::from_fn` layers.

pub mod gzip;

/// Media type essence of a `Content-Type` value (`text/html; charset=utf-8` -> `text/html`).
pub fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

/// Case-insensitive media type comparison, parameters ignored on both sides.
pub fn has_media_type(content_type: &str, expected: &str) -> bool {
    media_type(content_type).eq_ignore_ascii_case(media_type(expected))
}

//! Gzip framing around the handlers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use mymetrics_server::storage::Storage;
use mymetrics_server::transport::gzip::MAX_BODY_BYTES;

use common::{gunzip, gzip, mem_router, post, send};

#[tokio::test]
async fn listing_is_compressed_when_accepted() {
    let (app, _) = mem_router();
    post(&app, "/update/counter/hits/1").await;
    post(&app, "/update/gauge/temp/2").await;

    let req = Request::builder()
        .uri("/")
        .header("accept-encoding", "gzip")
        .body(Body::empty())
        .unwrap();
    let r = send(&app, req).await;

    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.headers.get("content-encoding").unwrap(), "gzip");
    let listing = gunzip(&r.body);
    assert!(listing.contains("hits"));
    assert!(listing.contains("temp"));
}

#[tokio::test]
async fn no_compression_without_accept() {
    let (app, _) = mem_router();
    let r = common::get(&app, "/").await;
    assert!(r.headers.get("content-encoding").is_none());
    assert_eq!(r.text(), "counter:\n\ngauge:\n\n");
}

#[tokio::test]
async fn q_zero_disables_gzip() {
    let (app, _) = mem_router();
    let req = Request::builder()
        .uri("/")
        .header("accept-encoding", "br, gzip;q=0")
        .body(Body::empty())
        .unwrap();
    let r = send(&app, req).await;
    assert!(r.headers.get("content-encoding").is_none());
}

#[tokio::test]
async fn empty_update_reply_is_left_alone() {
    let (app, _) = mem_router();
    let req = Request::builder()
        .method("POST")
        .uri("/update/counter/hits/1")
        .header("accept-encoding", "gzip, deflate")
        .body(Body::empty())
        .unwrap();
    let r = send(&app, req).await;
    assert_eq!(r.status, StatusCode::OK);
    assert!(r.headers.get("content-encoding").is_none());
    assert!(r.body.is_empty());
}

#[tokio::test]
async fn gzip_request_body_is_inflated() {
    let (app, _) = mem_router();
    let body = gzip(br#"{"id":"hits","type":"counter","delta":4}"#);

    let req = Request::builder()
        .method("POST")
        .uri("/update/")
        .header("content-type", "application/json")
        .header("content-encoding", "gzip")
        .header("accept-encoding", "gzip")
        .body(Body::from(body))
        .unwrap();
    let r = send(&app, req).await;

    assert_eq!(r.status, StatusCode::OK);
    assert_eq!(r.headers.get("content-encoding").unwrap(), "gzip");
    let reply: serde_json::Value = serde_json::from_str(&gunzip(&r.body)).unwrap();
    assert_eq!(reply, json!({"id": "hits", "type": "counter", "delta": 4}));
}

#[tokio::test]
async fn corrupt_gzip_request_is_400() {
    let (app, _) = mem_router();
    let req = Request::builder()
        .method("POST")
        .uri("/update/")
        .header("content-type", "application/json")
        .header("content-encoding", "gzip")
        .body(Body::from("definitely not gzip"))
        .unwrap();
    assert_eq!(send(&app, req).await.status, StatusCode::BAD_REQUEST);
}

fn json_with_id_len(len: usize) -> Vec<u8> {
    format!(r#"{{"id":"{}","type":"counter","delta":1}}"#, "x".repeat(len)).into_bytes()
}

fn update_request(body: Vec<u8>, gzipped: bool) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri("/update/")
        .header("content-type", "application/json");
    if gzipped {
        req = req.header("content-encoding", "gzip");
    }
    req.body(Body::from(body)).unwrap()
}

#[tokio::test]
async fn body_under_ceiling_is_accepted() {
    let (app, storage) = mem_router();
    let id_len = 3 << 20;

    let r = send(&app, update_request(gzip(&json_with_id_len(id_len)), true)).await;
    assert_eq!(r.status, StatusCode::OK);

    let r = send(&app, update_request(json_with_id_len(id_len), false)).await;
    assert_eq!(r.status, StatusCode::OK);

    let name = "x".repeat(id_len);
    assert_eq!(
        storage.get(&name, mymetrics_core::MetricKind::Counter).unwrap(),
        mymetrics_core::MetricValue::Counter(2)
    );
}

#[tokio::test]
async fn body_over_ceiling_is_400() {
    let (app, _) = mem_router();
    let oversized = json_with_id_len(MAX_BODY_BYTES);

    let r = send(&app, update_request(gzip(&oversized), true)).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);

    let r = send(&app, update_request(oversized, false)).await;
    assert_eq!(r.status, StatusCode::BAD_REQUEST);
}

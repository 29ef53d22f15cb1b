//! Router fixtures shared by the HTTP tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::io::{Read, Write};
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use tower::ServiceExt;

use mymetrics_server::app_state::AppState;
use mymetrics_server::router::build_router;
use mymetrics_server::storage::{MemStorage, Storage};

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub fn mem_router() -> (Router, Arc<MemStorage>) {
    let storage = Arc::new(MemStorage::new());
    let shared: Arc<dyn Storage> = storage.clone();
    (build_router(AppState::new(shared)), storage)
}

pub async fn send(app: &Router, req: Request<Body>) -> Reply {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    Reply { status, headers, body }
}

pub async fn post(app: &Router, uri: &str) -> Reply {
    let req = Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> Reply {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn gunzip(data: &[u8]) -> String {
    let mut out = String::new();
    GzDecoder::new(data).read_to_string(&mut out).unwrap();
    out
}

//! Test fixtures for building raw rows, uploads and app instances.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use ingest_core::domains::companies::data::RawRow;
use ingest_core::kernel::test_dependencies::{InMemoryCompanyStore, MockAI, TestDependencies};
use ingest_core::kernel::ServerDeps;
use ingest_core::server::{build_app, AppOptions};
use serde_json::Value as JsonValue;

pub const BOUNDARY: &str = "ingest-test-boundary";

/// Build a raw row from a JSON object literal.
pub fn row(value: JsonValue) -> RawRow {
    serde_json::from_value(value).expect("row fixture must be a JSON object")
}

/// Dependencies over a shared in-memory store, enrichment disabled.
pub fn deps_with_store(store: &InMemoryCompanyStore) -> ServerDeps {
    TestDependencies::new().store(store.clone()).into_deps()
}

/// Dependencies over a shared in-memory store with a mock AI.
pub fn deps_with_ai(store: &InMemoryCompanyStore, ai: &MockAI) -> ServerDeps {
    TestDependencies::new()
        .store(store.clone())
        .ai(ai.clone())
        .into_deps()
}

pub fn app(deps: ServerDeps) -> Router {
    build_app(deps, AppOptions::default())
}

/// Multipart body with optional `file` and `use_ai` parts.
pub fn multipart_body(csv: Option<&str>, use_ai: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(flag) = use_ai {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"use_ai\"\r\n\r\n{flag}\r\n"
        ));
    }
    if let Some(csv) = csv {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"companies.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

pub fn upload_request(csv: Option<&str>, use_ai: Option<&str>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(csv, use_ai)))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a JSON response body.
pub async fn json_body(response: Response<Body>) -> JsonValue {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

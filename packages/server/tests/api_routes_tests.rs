//! HTTP surface tests: the router is driven in-process with `oneshot`.

mod common;

use axum::http::StatusCode;
use common::{app, delete_request, deps_with_ai, deps_with_store, get_request, json_body, upload_request};
use ingest_core::kernel::test_dependencies::{InMemoryCompanyStore, MockAI, TestDependencies};
use ingest_core::server::{build_app, AppOptions};
use tower::ServiceExt;

const CSV: &str = "name,domain,country,city,employees\n\
                   Acme,acme.com,US,Boston,40\n\
                   Beta,,France,Paris,300\n\
                   Gamma,gamma.io,Germany,Berlin,5k\n";

#[tokio::test]
async fn upload_requires_a_file() {
    let app = app(deps_with_store(&InMemoryCompanyStore::new()));

    let response = app.oneshot(upload_request(None, Some("1"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "file is required");
}

#[tokio::test]
async fn upload_reports_rows_processed() {
    let store = InMemoryCompanyStore::new();
    let app = app(deps_with_store(&store));

    let response = app.oneshot(upload_request(Some(CSV), None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["inserted"], 3);
    assert_eq!(body["summary"]["upserted"], 2);
    assert_eq!(body["summary"]["inserted"], 1);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn upload_only_enriches_when_flag_is_one() {
    let store = InMemoryCompanyStore::new();
    let ai = MockAI::new();

    let response = app(deps_with_ai(&store, &ai))
        .oneshot(upload_request(Some("name\nAcme\n"), Some("0")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ai.call_count(), 0);

    let response = app(deps_with_ai(&store, &ai))
        .oneshot(upload_request(Some("name\nBeta\n"), Some("1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ai.call_count(), 1);
}

#[tokio::test]
async fn upload_store_failure_is_500() {
    let store = InMemoryCompanyStore::new().fail_writes("connection reset by peer");
    let app = app(deps_with_store(&store));

    let response = app.oneshot(upload_request(Some(CSV), None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("connection reset by peer"));
}

#[tokio::test]
async fn upload_rejects_oversized_bodies() {
    let deps = TestDependencies::new().into_deps();
    let app = build_app(
        deps,
        AppOptions {
            max_upload_bytes: 64,
            ..Default::default()
        },
    );

    let response = app.oneshot(upload_request(Some(CSV), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let store = InMemoryCompanyStore::new();
    app(deps_with_store(&store))
        .oneshot(upload_request(Some(CSV), None))
        .await
        .unwrap();

    let body = json_body(
        app(deps_with_store(&store))
            .oneshot(get_request("/api/companies"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let body = json_body(
        app(deps_with_store(&store))
            .oneshot(get_request("/api/companies?country=Germany"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["domain"], "gamma.io");

    let body = json_body(
        app(deps_with_store(&store))
            .oneshot(get_request("/api/companies?employee_size=201-500"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["name"], "Beta");

    let body = json_body(
        app(deps_with_store(&store))
            .oneshot(get_request("/api/companies?domain=ACM"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["total"], 1);

    let body = json_body(
        app(deps_with_store(&store))
            .oneshot(get_request("/api/companies?limit=1&offset=1"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_clears_everything() {
    let store = InMemoryCompanyStore::new();
    app(deps_with_store(&store))
        .oneshot(upload_request(Some(CSV), None))
        .await
        .unwrap();

    let response = app(deps_with_store(&store))
        .oneshot(delete_request("/api/companies"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["deleted"], 3);
    assert!(store.is_empty());
}

#[tokio::test]
async fn reference_lists() {
    let store = InMemoryCompanyStore::new();

    let body = json_body(
        app(deps_with_store(&store))
            .oneshot(get_request("/api/employee-sizes"))
            .await
            .unwrap(),
    )
    .await;
    let sizes: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        sizes,
        vec![
            "1-10",
            "11-50",
            "51-200",
            "201-500",
            "501-1 000",
            "1 001-5 000",
            "5 001-10 000",
            "10 000+"
        ]
    );

    let body = json_body(
        app(deps_with_store(&store))
            .oneshot(get_request("/api/countries"))
            .await
            .unwrap(),
    )
    .await;
    let countries: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(countries.contains(&"United States of America"));
    assert!(countries.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn health_reflects_store() {
    let healthy = app(deps_with_store(&InMemoryCompanyStore::new()))
        .oneshot(get_request("/health"))
        .await
        .unwrap();
    assert_eq!(healthy.status(), StatusCode::OK);
    let body = json_body(healthy).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["enrichment"], "disabled");

    let down = InMemoryCompanyStore::new().unavailable("connection refused");
    let unhealthy = app(deps_with_store(&down))
        .oneshot(get_request("/health"))
        .await
        .unwrap();
    assert_eq!(unhealthy.status(), StatusCode::SERVICE_UNAVAILABLE);
}

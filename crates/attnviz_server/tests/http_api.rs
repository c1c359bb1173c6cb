//! HTTP dispatcher integration tests.
//!
//! Starts an axum server over an in-memory database and exercises it with
//! reqwest.

use std::sync::Arc;

use attnviz_core::db::{open_db, open_db_in_memory};
use attnviz_core::{RelevanceMatrix, RelevanceScorer};
use attnviz_server::{router, AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Bind to port 0 and return the base URL.
async fn start_server(state: AppState) -> String {
    let app = router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn start_default_server() -> String {
    start_server(AppState::new(open_db_in_memory().unwrap())).await
}

#[tokio::test]
async fn health_reports_ok_and_version() {
    let base = start_default_server().await;
    let resp = reqwest::get(format!("{base}/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["version"], attnviz_core::core_version());
}

#[tokio::test]
async fn create_get_delete_get_scenario() {
    let base = start_default_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/texts"))
        .json(&json!({ "text": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 1, "text": "hello" }));

    let resp = client.get(format!("{base}/api/texts/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 1, "text": "hello" }));

    let resp = client
        .delete(format!("{base}/api/texts/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.text().await.unwrap().is_empty());

    let resp = client.get(format!("{base}/api/texts/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.text().await.unwrap().contains("not found"));
}

#[tokio::test]
async fn list_returns_empty_array_then_records_in_id_order() {
    let base = start_default_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/texts")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));

    for text in ["first", "second"] {
        let resp = client
            .post(format!("{base}/api/texts"))
            .json(&json!({ "text": text }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let body: Value = client
        .get(format!("{base}/api/texts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        json!([{ "id": 1, "text": "first" }, { "id": 2, "text": "second" }])
    );
}

#[tokio::test]
async fn over_long_text_is_rejected_on_create_and_update() {
    let base = start_default_server().await;
    let client = reqwest::Client::new();
    let too_long = "a".repeat(101);

    let resp = client
        .post(format!("{base}/api/texts"))
        .json(&json!({ "text": too_long }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Text exceeds 100 characters");

    let resp = client
        .post(format!("{base}/api/texts"))
        .json(&json!({ "text": "keep me" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .put(format!("{base}/api/texts/1"))
        .json(&json!({ "text": too_long }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = client
        .get(format!("{base}/api/texts/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "id": 1, "text": "keep me" }));
}

#[tokio::test]
async fn length_limit_counts_utf8_bytes() {
    let base = start_default_server().await;
    let client = reqwest::Client::new();

    // 60 two-byte characters: 120 bytes.
    let resp = client
        .post(format!("{base}/api/texts"))
        .json(&json!({ "text": "é".repeat(60) }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Text exceeds 100 characters");

    let resp = client
        .post(format!("{base}/api/texts"))
        .json(&json!({ "text": "é".repeat(50) }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_preflight_and_simple_requests_allow_any_origin() {
    let base = start_default_server().await;
    let client = reqwest::Client::new();
    let origin = "http://localhost:3000";

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/api/texts"))
        .header("Origin", origin)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], origin);
    assert_eq!(headers["access-control-allow-credentials"], "true");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }
    assert_eq!(headers["access-control-allow-headers"], "content-type");

    let resp = client
        .get(format!("{base}/api/texts"))
        .header("Origin", origin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], origin);
}

#[tokio::test]
async fn update_replaces_text_and_missing_id_is_not_found() {
    let base = start_default_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/api/texts"))
        .json(&json!({ "text": "draft" }))
        .send()
        .await
        .unwrap();

    let resp = client
        .put(format!("{base}/api/texts/1"))
        .json(&json!({ "text": "final" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 1, "text": "final" }));

    let resp = client
        .put(format!("{base}/api/texts/99"))
        .json(&json!({ "text": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_id_still_returns_no_content() {
    let base = start_default_server().await;
    let resp = reqwest::Client::new()
        .delete(format!("{base}/api/texts/12345"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn malformed_text_payload_and_bad_id_are_bad_requests() {
    let base = start_default_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/texts"))
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .get(format!("{base}/api/texts/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = client
        .get(format!("{base}/api/texts"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_without_text_field_or_content_type_stores_empty_text() {
    let base = start_default_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/texts"))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": 1, "text": "" }));
}

#[tokio::test]
async fn visualize_returns_uniform_relevance_matrix() {
    let base = start_default_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/visualize"))
        .json(&json!({ "text": "one two" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let matrix: Vec<Vec<f64>> = resp.json().await.unwrap();
    assert_eq!(matrix, vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
}

#[tokio::test]
async fn visualize_tolerates_blank_and_malformed_payloads() {
    let base = start_default_server().await;
    let client = reqwest::Client::new();

    for body in ["{not json", "", r#"{"text":"   "}"#] {
        let resp = client
            .post(format!("{base}/api/visualize"))
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let matrix: Value = resp.json().await.unwrap();
        assert_eq!(matrix, json!([]));
    }
}

struct DiagonalOnly;

impl RelevanceScorer for DiagonalOnly {
    fn score(&self, tokens: &[String]) -> RelevanceMatrix {
        let n = tokens.len();
        (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect()
    }
}

#[tokio::test]
async fn visualize_uses_injected_scorer() {
    let state = AppState::with_scorer(open_db_in_memory().unwrap(), Arc::new(DiagonalOnly));
    let base = start_server(state).await;

    let matrix: Vec<Vec<f64>> = reqwest::Client::new()
        .post(format!("{base}/api/visualize"))
        .json(&json!({ "text": "a b" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(matrix, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test]
async fn records_persist_across_server_restarts_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("textdata.db");
    let client = reqwest::Client::new();

    let base = start_server(AppState::new(open_db(&path).unwrap())).await;
    let resp = client
        .post(format!("{base}/api/texts"))
        .json(&json!({ "text": "durable" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let base = start_server(AppState::new(open_db(&path).unwrap())).await;
    let body: Value = client
        .get(format!("{base}/api/texts/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "id": 1, "text": "durable" }));
}

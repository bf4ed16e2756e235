// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Pulse Security - HTTP API Tests
 * Endpoint behavior against a server bound to an ephemeral port
 *
 * @copyright 2026 Pulse Security Oy
 * @license Proprietary
 */

use pulse_scanner::api::{self, ApiState};
use pulse_scanner::http_client::HttpClient;
use pulse_scanner::lifecycle::ScanLifecycle;
use pulse_scanner::scanner::ProbeEngine;
use pulse_scanner::store::MemoryStore;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    matchers::method,
    Mock, MockServer, Request, ResponseTemplate,
};

/// Serve the API on an ephemeral port and return its base URL
async fn serve_api() -> String {
    let lifecycle = Arc::new(ScanLifecycle::new(Arc::new(MemoryStore::new())));
    let engine = Arc::new(ProbeEngine::new(Arc::new(
        HttpClient::new(5, 64 * 1024).unwrap(),
    )));
    let app = api::router(Arc::new(ApiState { lifecycle, engine }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn health_reports_ok() {
    let base = serve_api().await;
    let body: Value = reqwest::get(format!("{}/api/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn blank_url_is_rejected() {
    let base = serve_api().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/scans", base))
        .json(&serde_json::json!({ "url": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("URL"));
}

#[tokio::test]
async fn submitted_scan_is_pending_then_terminal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(|req: &Request| {
            let id = req
                .url
                .query_pairs()
                .find(|(k, _)| k == "id")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            ResponseTemplate::new(200).set_body_string(format!("item {}", id))
        })
        .mount(&mock_server)
        .await;

    let base = serve_api().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/scans", base))
        .json(&serde_json::json!({ "url": format!("{}/?id=1", mock_server.uri()) }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let scan_id = body["data"]["id"].as_i64().unwrap();

    // Submission returns immediately; poll until the detached task finishes
    let mut report = Value::Null;
    for _ in 0..100 {
        let body: Value = client
            .get(format!("{}/api/scans/{}", base, scan_id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let status = body["data"]["scan"]["status"].as_str().unwrap().to_string();
        if status == "completed" || status == "failed" {
            report = body;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(report["data"]["scan"]["status"], "completed");
    let findings = report["data"]["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["category"], "xss");
    assert_eq!(findings[0]["severity"], "medium");
}

#[tokio::test]
async fn missing_scan_is_404() {
    let base = serve_api().await;
    let response = reqwest::get(format!("{}/api/scans/999", base)).await.unwrap();
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_removes_the_scan() {
    let base = serve_api().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/api/scans", base))
        .json(&serde_json::json!({ "url": "http://127.0.0.1:9/?id=1" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let scan_id = body["data"]["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/api/scans/{}", base, scan_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/api/scans/{}", base, scan_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn list_contains_submitted_scans() {
    let base = serve_api().await;
    let client = reqwest::Client::new();

    for url in ["http://127.0.0.1:9/?a=1", "http://127.0.0.1:9/?b=2"] {
        client
            .post(format!("{}/api/scans", base))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await
            .unwrap();
    }

    let body: Value = client
        .get(format!("{}/api/scans", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    let scans = body["data"].as_array().unwrap();
    assert_eq!(scans.len(), 2);
}

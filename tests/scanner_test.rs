// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Pulse Security - Probe Engine Tests
 * Detection behavior against mock endpoints
 *
 * @copyright 2026 Pulse Security Oy
 * @license Proprietary
 */

use pulse_scanner::errors::ScanError;
use pulse_scanner::http_client::HttpClient;
use pulse_scanner::payloads;
use pulse_scanner::scanner::ProbeEngine;
use pulse_scanner::types::{Severity, VulnCategory};
use std::sync::Arc;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

fn engine() -> ProbeEngine {
    ProbeEngine::new(Arc::new(HttpClient::new(5, 64 * 1024).unwrap()))
}

/// Responder that echoes the `q` query parameter unescaped
fn echo_q(req: &Request) -> ResponseTemplate {
    let q = req
        .url
        .query_pairs()
        .find(|(k, _)| k == "q")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default();
    ResponseTemplate::new(200).set_body_string(format!("<p>You searched for: {}</p>", q))
}

#[tokio::test]
async fn reflected_payload_yields_one_xss_finding() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(echo_q)
        .mount(&mock_server)
        .await;

    let target = format!("{}/search?q=hello", mock_server.uri());
    let findings = engine().probe(&target).await.unwrap();

    assert_eq!(findings.len(), 1);
    let finding = &findings[0];
    assert_eq!(finding.category, VulnCategory::Xss);
    assert_eq!(finding.severity, Severity::Medium);
    assert_eq!(finding.location, "parameter: q");
    // Early exit: the first matching payload is reported, later ones are
    // never attempted
    assert_eq!(finding.payload, payloads::xss_payloads()[0]);

    // 5 SQLi probes (no match) plus a single XSS probe
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), payloads::sqli_payloads().len() + 1);
}

#[tokio::test]
async fn database_error_leak_yields_one_sqli_finding() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("You have an error in your SQL syntax near ''1'='1'"),
        )
        .mount(&mock_server)
        .await;

    let target = format!("{}/item?id=1", mock_server.uri());
    let findings = engine().probe(&target).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, VulnCategory::SqlInjection);
    assert_eq!(findings[0].severity, Severity::High);
    assert_eq!(findings[0].location, "parameter: id");
    assert_eq!(findings[0].payload, payloads::sqli_payloads()[0]);
}

#[tokio::test]
async fn no_query_parameters_means_no_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let target = format!("{}/plain", mock_server.uri());
    let findings = engine().probe(&target).await.unwrap();

    assert!(findings.is_empty());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn clean_responses_bound_the_request_count() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nothing here</html>"))
        .mount(&mock_server)
        .await;

    let target = format!("{}/page?a=1&b=2", mock_server.uri());
    let findings = engine().probe(&target).await.unwrap();

    assert!(findings.is_empty());
    let per_param = payloads::sqli_payloads().len() + payloads::xss_payloads().len();
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2 * per_param);
}

#[tokio::test]
async fn unparseable_target_fails_without_probing() {
    let result = engine().probe("::not a url::").await;
    assert!(matches!(result, Err(ScanError::InvalidTarget { .. })));
}

#[tokio::test]
async fn transport_failures_are_skipped() {
    // Discard port: every request is refused, every attempt is forfeited
    let findings = engine()
        .probe("http://127.0.0.1:9/search?q=test")
        .await
        .unwrap();
    assert!(findings.is_empty());
}

#[tokio::test]
async fn mixed_categories_attribute_the_right_parameters() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(|req: &Request| {
            let id = req
                .url
                .query_pairs()
                .find(|(k, _)| k == "id")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            if id.contains('\'') {
                ResponseTemplate::new(500).set_body_string("MySQL error: bad query")
            } else {
                echo_q(req)
            }
        })
        .mount(&mock_server)
        .await;

    let target = format!("{}/search?id=1&q=hello", mock_server.uri());
    let findings = engine().probe(&target).await.unwrap();

    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].category, VulnCategory::SqlInjection);
    assert_eq!(findings[0].location, "parameter: id");
    assert_eq!(findings[1].category, VulnCategory::Xss);
    assert_eq!(findings[1].location, "parameter: q");
}

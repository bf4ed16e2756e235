// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

//! Probe Engine
//!
//! Mutates a target URL's query parameters with attack payloads, issues
//! bounded-timeout GET requests, and classifies responses into findings.
//! Detection is heuristic by design:
//! - SQL injection: database error signatures leaked in the body
//! - XSS: byte-exact, unescaped reflection of the injected payload
//!
//! Neither detector attempts semantic verification; false positives and
//! negatives are accepted.

use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::errors::{ScanError, ScanResult};
use crate::http_client::HttpClient;
use crate::payloads;
use crate::types::{NewFinding, VulnCategory};

/// Body prefix inspected by the SQL error signature detector
const SQLI_BODY_WINDOW: usize = 4096;

/// Body prefix inspected by the reflection detector
const XSS_BODY_WINDOW: usize = 8192;

pub struct ProbeEngine {
    http_client: Arc<HttpClient>,
}

impl ProbeEngine {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Probe every query parameter of `target_url` for SQL injection and
    /// reflected XSS.
    ///
    /// Fails fast with `InvalidTarget` before any network activity when the
    /// URL does not parse. Individual transport failures are skipped; at most
    /// one finding is recorded per (parameter, category) pair.
    pub async fn probe(&self, target_url: &str) -> ScanResult<Vec<NewFinding>> {
        let parsed = Url::parse(target_url).map_err(|e| ScanError::InvalidTarget {
            url: target_url.to_string(),
            reason: e.to_string(),
        })?;

        let params = parameter_names(&parsed);
        if params.is_empty() {
            debug!(url = %target_url, "no query parameters, nothing to probe");
            return Ok(Vec::new());
        }

        info!(url = %target_url, parameters = params.len(), "probing target");

        let mut findings = Vec::new();
        for category in [VulnCategory::SqlInjection, VulnCategory::Xss] {
            for param in &params {
                if let Some(finding) = self.probe_parameter(&parsed, param, category).await {
                    findings.push(finding);
                }
            }
        }

        info!(url = %target_url, findings = findings.len(), "probe finished");
        Ok(findings)
    }

    /// Try each catalog payload against one parameter, stopping at the first
    /// positive classification.
    async fn probe_parameter(
        &self,
        target: &Url,
        param: &str,
        category: VulnCategory,
    ) -> Option<NewFinding> {
        let catalog = match category {
            VulnCategory::SqlInjection => payloads::sqli_payloads(),
            VulnCategory::Xss => payloads::xss_payloads(),
        };

        for payload in catalog {
            let probe_url = build_probe_url(target, param, payload);

            let response = match self.http_client.get(probe_url.as_str()).await {
                Ok(response) => response,
                Err(e) => {
                    // A single transport failure forfeits this attempt only
                    debug!(url = %probe_url, error = %e, "probe request failed, skipping");
                    continue;
                }
            };

            let vulnerable = match category {
                VulnCategory::SqlInjection => body_leaks_sql_error(&response.body),
                VulnCategory::Xss => body_reflects_payload(&response.body, payload),
            };

            if vulnerable {
                info!(parameter = %param, category = %category, "vulnerability detected");
                return Some(finding_for(param, payload, category));
            }
        }

        None
    }
}

/// Query parameter names in first-occurrence order, deduplicated
fn parameter_names(url: &Url) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (name, _) in url.query_pairs() {
        if !names.iter().any(|n| *n == name) {
            names.push(name.into_owned());
        }
    }
    names
}

/// Rebuild the target URL with one parameter's value replaced by the payload,
/// every other pair retained unchanged
fn build_probe_url(target: &Url, param: &str, payload: &str) -> Url {
    let pairs: Vec<(String, String)> = target
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut probe = target.clone();
    {
        let mut query = probe.query_pairs_mut();
        query.clear();
        for (name, value) in &pairs {
            if name == param {
                query.append_pair(name, payload);
            } else {
                query.append_pair(name, value);
            }
        }
    }
    probe
}

/// SQL injection detector: lowercased body prefix contains a known database
/// error signature
fn body_leaks_sql_error(body: &[u8]) -> bool {
    let window = &body[..body.len().min(SQLI_BODY_WINDOW)];
    let lowered = window.to_ascii_lowercase();
    payloads::sql_error_signatures()
        .iter()
        .any(|sig| contains_subslice(&lowered, sig.as_bytes()))
}

/// XSS detector: body prefix contains the payload byte-for-byte, unescaped
fn body_reflects_payload(body: &[u8], payload: &str) -> bool {
    let window = &body[..body.len().min(XSS_BODY_WINDOW)];
    contains_subslice(window, payload.as_bytes())
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}

fn finding_for(param: &str, payload: &str, category: VulnCategory) -> NewFinding {
    let (description, remediation) = match category {
        VulnCategory::SqlInjection => (
            format!(
                "SQL injection vulnerability detected. Parameter '{}' is injectable.",
                param
            ),
            "Validate parameter input and use prepared statements.".to_string(),
        ),
        VulnCategory::Xss => (
            format!(
                "Reflected XSS vulnerability detected. Parameter '{}' echoes unescaped input.",
                param
            ),
            "Escape or sanitize user input and set a Content-Security-Policy header.".to_string(),
        ),
    };

    NewFinding {
        category,
        severity: category.severity(),
        location: format!("parameter: {}", param),
        payload: payload.to_string(),
        description,
        remediation,
    }
}

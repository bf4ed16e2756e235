// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::{ScanError, ScanResult};

/// Default per-probe request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on buffered response body bytes
///
/// Detectors only inspect a short body prefix, so anything past the cap is
/// discarded without being read into memory.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// HTTP response subset consumed by the detectors
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

/// Explicitly constructed probing client with a fixed request timeout
///
/// Held by the probe engine; no ambient global client exists.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_body_bytes: usize,
}

impl HttpClient {
    pub fn new(timeout_secs: u64, max_body_bytes: usize) -> ScanResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("pulse-scanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScanError::Configuration(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    /// Issue a single GET against a probe URL
    ///
    /// Transport failures map to `ScanError::Transport`; the caller decides
    /// whether they are fatal.
    pub async fn get(&self, url: &str) -> ScanResult<HttpResponse> {
        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();

        let bytes = response.bytes().await?;
        let mut body = bytes.to_vec();
        if body.len() > self.max_body_bytes {
            body.truncate(self.max_body_bytes);
        }

        debug!(url = %url, status = status_code, bytes = body.len(), "probe response");

        Ok(HttpResponse { status_code, body })
    }
}

// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Pulse Security - Error Types
 * Scan backend error handling with thiserror
 *
 * @copyright 2026 Pulse Security Oy
 * @license Proprietary
 */

use thiserror::Error;

use crate::types::ScanStatus;

/// Scan backend error type covering probing, lifecycle, and storage failures
#[derive(Error, Debug)]
pub enum ScanError {
    /// Target URL could not be parsed; probing never starts
    #[error("invalid target URL '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    /// Scan submission with a blank target URL
    #[error("target URL is required")]
    EmptyUrl,

    /// Lifecycle operation invoked against the wrong current state
    #[error("scan {id} is not in pending status (current: {current})")]
    InvalidTransition { id: i64, current: ScanStatus },

    /// Operation on a scan that does not exist
    #[error("scan {0} not found")]
    NotFound(i64),

    /// Probe-level HTTP failure (timeout, refused connection, DNS)
    #[error("transport error: {0}")]
    Transport(String),

    /// Persistence failure surfaced from the storage backend
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid or missing configuration value
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ScanError {
    /// Transport errors are recovered locally by the probe engine; every
    /// other kind fails the operation that produced it.
    pub fn is_transport(&self) -> bool {
        matches!(self, ScanError::Transport(_))
    }
}

/// Convert reqwest errors to probe transport errors
impl From<reqwest::Error> for ScanError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            let url = err.url().map(|u| u.to_string()).unwrap_or_default();
            ScanError::Transport(format!("request timed out for {}", url))
        } else if err.is_connect() {
            let url = err.url().map(|u| u.to_string()).unwrap_or_default();
            ScanError::Transport(format!("connection failed for {}", url))
        } else if err.is_builder() {
            ScanError::InvalidTarget {
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                reason: err.to_string(),
            }
        } else {
            ScanError::Transport(err.to_string())
        }
    }
}

/// Convert tokio-postgres errors to storage errors
impl From<tokio_postgres::Error> for ScanError {
    fn from(err: tokio_postgres::Error) -> Self {
        ScanError::Storage(err.to_string())
    }
}

/// Convert deadpool pool errors to storage errors
impl From<deadpool_postgres::PoolError> for ScanError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        ScanError::Storage(format!("connection pool: {}", err))
    }
}

/// Result type for scan backend operations
pub type ScanResult<T> = Result<T, ScanError>;

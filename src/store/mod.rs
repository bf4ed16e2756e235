// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Pulse Security - Storage Layer
 * Scan and finding persistence behind a backend-agnostic trait
 *
 * @copyright 2026 Pulse Security Oy
 * @license Proprietary
 */

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::ScanResult;
use crate::types::{Finding, NewFinding, Scan, ScanStatus};

/// Persistence contract for scan jobs and their findings
///
/// The store is the only shared mutable resource between concurrent scan
/// orchestrations; callers rely on per-row write serialization and do no
/// locking of their own.
#[async_trait]
pub trait ScanStore: Send + Sync {
    /// Create a pending scan and assign its identity
    async fn create_scan(&self, url: &str) -> ScanResult<Scan>;

    /// Fetch one scan; `NotFound` when it does not exist
    async fn get_scan(&self, id: i64) -> ScanResult<Scan>;

    /// All scans, newest first
    async fn list_scans(&self) -> ScanResult<Vec<Scan>>;

    /// Record the start timestamp and move the scan to `Running`
    async fn mark_started(&self, id: i64, started_at: DateTime<Utc>) -> ScanResult<()>;

    /// Terminal update: replace the scan's findings wholesale and record the
    /// terminal status, completion timestamp, and error message in a single
    /// atomic operation
    async fn finish_scan(
        &self,
        id: i64,
        completed_at: DateTime<Utc>,
        status: ScanStatus,
        error_message: Option<String>,
        findings: Vec<NewFinding>,
    ) -> ScanResult<()>;

    /// Findings owned by one scan, in insertion order
    async fn findings_for_scan(&self, scan_id: i64) -> ScanResult<Vec<Finding>>;

    /// Delete a scan and cascade to its findings
    async fn delete_scan(&self, id: i64) -> ScanResult<()>;
}

// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scan Lifecycle Manager
//!
//! Sole mutator of scan job state. Governs the Pending → Running →
//! {Completed, Failed} state machine; every transition persists through the
//! store before returning.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::errors::{ScanError, ScanResult};
use crate::store::ScanStore;
use crate::types::{NewFinding, Scan, ScanReport, ScanStatus};

pub struct ScanLifecycle {
    store: Arc<dyn ScanStore>,
}

impl ScanLifecycle {
    pub fn new(store: Arc<dyn ScanStore>) -> Self {
        Self { store }
    }

    /// Create a pending scan job for a target URL
    pub async fn submit(&self, url: &str) -> ScanResult<Scan> {
        if url.trim().is_empty() {
            return Err(ScanError::EmptyUrl);
        }

        let scan = self.store.create_scan(url).await?;
        info!(scan_id = scan.id, url = %scan.url, "scan submitted");
        Ok(scan)
    }

    /// Move a pending scan to `Running` and record its start timestamp
    ///
    /// Rejects anything but the Pending → Running transition, so a scan
    /// cannot be started twice.
    pub async fn start(&self, id: i64) -> ScanResult<()> {
        let scan = self.store.get_scan(id).await?;
        if scan.status != ScanStatus::Pending {
            return Err(ScanError::InvalidTransition {
                id,
                current: scan.status,
            });
        }

        self.store.mark_started(id, Utc::now()).await?;
        info!(scan_id = id, "scan running");
        Ok(())
    }

    /// Drive a scan to its terminal state
    ///
    /// With no error message the scan becomes `Completed` and `findings`
    /// replace any previously stored findings wholesale. With an error
    /// message the scan becomes `Failed` and stores no findings, discarding
    /// whatever probing had already produced.
    pub async fn complete(
        &self,
        id: i64,
        findings: Vec<NewFinding>,
        error_message: Option<String>,
    ) -> ScanResult<()> {
        self.store.get_scan(id).await?;

        let (status, findings) = match error_message {
            Some(_) => (ScanStatus::Failed, Vec::new()),
            None => (ScanStatus::Completed, findings),
        };

        let count = findings.len();
        self.store
            .finish_scan(id, Utc::now(), status, error_message, findings)
            .await?;
        info!(scan_id = id, status = %status, findings = count, "scan finished");
        Ok(())
    }

    /// Current persisted state of one scan, with its findings
    pub async fn report(&self, id: i64) -> ScanResult<ScanReport> {
        let scan = self.store.get_scan(id).await?;
        let findings = self.store.findings_for_scan(id).await?;
        Ok(ScanReport { scan, findings })
    }

    /// All scans, newest first
    pub async fn list(&self) -> ScanResult<Vec<Scan>> {
        self.store.list_scans().await
    }

    /// Remove a scan and its findings
    pub async fn delete(&self, id: i64) -> ScanResult<()> {
        self.store.delete_scan(id).await?;
        info!(scan_id = id, "scan deleted");
        Ok(())
    }
}

// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory store used when PostgreSQL is disabled and by the test suite.
//!
//! State does not survive a restart; every operation is atomic under one
//! async lock, which trivially satisfies the terminal-update atomicity the
//! Postgres backend gets from a transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::errors::{ScanError, ScanResult};
use crate::store::ScanStore;
use crate::types::{Finding, NewFinding, Scan, ScanStatus};

#[derive(Default)]
struct Inner {
    next_scan_id: i64,
    next_finding_id: i64,
    scans: HashMap<i64, Scan>,
    findings: HashMap<i64, Vec<Finding>>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScanStore for MemoryStore {
    async fn create_scan(&self, url: &str) -> ScanResult<Scan> {
        let mut inner = self.inner.write().await;
        inner.next_scan_id += 1;
        let scan = Scan {
            id: inner.next_scan_id,
            url: url.to_string(),
            status: ScanStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            error_message: None,
        };
        inner.scans.insert(scan.id, scan.clone());
        Ok(scan)
    }

    async fn get_scan(&self, id: i64) -> ScanResult<Scan> {
        let inner = self.inner.read().await;
        inner.scans.get(&id).cloned().ok_or(ScanError::NotFound(id))
    }

    async fn list_scans(&self) -> ScanResult<Vec<Scan>> {
        let inner = self.inner.read().await;
        let mut scans: Vec<Scan> = inner.scans.values().cloned().collect();
        scans.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(scans)
    }

    async fn mark_started(&self, id: i64, started_at: DateTime<Utc>) -> ScanResult<()> {
        let mut inner = self.inner.write().await;
        let scan = inner.scans.get_mut(&id).ok_or(ScanError::NotFound(id))?;
        scan.status = ScanStatus::Running;
        scan.started_at = Some(started_at);
        Ok(())
    }

    async fn finish_scan(
        &self,
        id: i64,
        completed_at: DateTime<Utc>,
        status: ScanStatus,
        error_message: Option<String>,
        findings: Vec<NewFinding>,
    ) -> ScanResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.scans.contains_key(&id) {
            return Err(ScanError::NotFound(id));
        }

        let mut stored = Vec::with_capacity(findings.len());
        for finding in findings {
            inner.next_finding_id += 1;
            stored.push(Finding {
                id: inner.next_finding_id,
                scan_id: id,
                category: finding.category,
                severity: finding.severity,
                location: finding.location,
                payload: finding.payload,
                description: finding.description,
                remediation: finding.remediation,
                created_at: completed_at,
            });
        }
        inner.findings.insert(id, stored);

        let scan = inner.scans.get_mut(&id).ok_or(ScanError::NotFound(id))?;
        scan.status = status;
        scan.completed_at = Some(completed_at);
        scan.error_message = error_message;
        Ok(())
    }

    async fn findings_for_scan(&self, scan_id: i64) -> ScanResult<Vec<Finding>> {
        let inner = self.inner.read().await;
        Ok(inner.findings.get(&scan_id).cloned().unwrap_or_default())
    }

    async fn delete_scan(&self, id: i64) -> ScanResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .scans
            .remove(&id)
            .ok_or(ScanError::NotFound(id))?;
        inner.findings.remove(&id);
        Ok(())
    }
}

// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Pulse Security - PostgreSQL Store
 * Scan and finding persistence with connection pooling
 *
 * @copyright 2026 Pulse Security Oy
 * @license Proprietary
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::{NoTls, Row};
use tracing::info;

use crate::errors::{ScanError, ScanResult};
use crate::store::ScanStore;
use crate::types::{Finding, NewFinding, Scan, ScanStatus, Severity, VulnCategory};

pub struct PostgresStore {
    pool: Pool,
}

impl PostgresStore {
    /// Create a pooled store and verify connectivity
    pub async fn connect(database_url: &str, pool_size: usize) -> ScanResult<Self> {
        let mut pg_config = Config::new();
        pg_config.url = Some(database_url.to_string());
        pg_config.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        pg_config.pool = Some(deadpool_postgres::PoolConfig::new(pool_size));

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ScanError::Storage(format!("failed to create pool: {}", e)))?;

        let client = pool.get().await?;
        client.query("SELECT 1", &[]).await?;

        info!(pool_size, "PostgreSQL connected");
        Ok(Self { pool })
    }

    /// Initialize the schema; safe to run on every startup
    pub async fn init_schema(&self) -> ScanResult<()> {
        let client = self.pool.get().await?;

        client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS scans (
                    id BIGSERIAL PRIMARY KEY,
                    url TEXT NOT NULL,
                    status VARCHAR(20) NOT NULL DEFAULT 'pending',
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
                    started_at TIMESTAMP WITH TIME ZONE,
                    completed_at TIMESTAMP WITH TIME ZONE,
                    error_message TEXT
                )
                "#,
                &[],
            )
            .await?;

        client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS findings (
                    id BIGSERIAL PRIMARY KEY,
                    scan_id BIGINT NOT NULL REFERENCES scans(id) ON DELETE CASCADE,
                    category VARCHAR(50) NOT NULL,
                    severity VARCHAR(20) NOT NULL,
                    location TEXT NOT NULL,
                    payload TEXT NOT NULL,
                    description TEXT NOT NULL,
                    remediation TEXT NOT NULL,
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
                )
                "#,
                &[],
            )
            .await?;

        client
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_findings_scan_id ON findings(scan_id)",
                &[],
            )
            .await?;

        client
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_scans_created_at ON scans(created_at)",
                &[],
            )
            .await?;

        info!("database schema initialized");
        Ok(())
    }
}

fn scan_from_row(row: &Row) -> ScanResult<Scan> {
    let status_raw: String = row.get("status");
    let status = ScanStatus::parse(&status_raw)
        .ok_or_else(|| ScanError::Storage(format!("unknown scan status '{}'", status_raw)))?;

    Ok(Scan {
        id: row.get("id"),
        url: row.get("url"),
        status,
        created_at: row.get("created_at"),
        started_at: row.get("started_at"),
        completed_at: row.get("completed_at"),
        error_message: row.get("error_message"),
    })
}

fn finding_from_row(row: &Row) -> ScanResult<Finding> {
    let category_raw: String = row.get("category");
    let category = VulnCategory::parse(&category_raw)
        .ok_or_else(|| ScanError::Storage(format!("unknown category '{}'", category_raw)))?;
    let severity_raw: String = row.get("severity");
    let severity = Severity::parse(&severity_raw)
        .ok_or_else(|| ScanError::Storage(format!("unknown severity '{}'", severity_raw)))?;

    Ok(Finding {
        id: row.get("id"),
        scan_id: row.get("scan_id"),
        category,
        severity,
        location: row.get("location"),
        payload: row.get("payload"),
        description: row.get("description"),
        remediation: row.get("remediation"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl ScanStore for PostgresStore {
    async fn create_scan(&self, url: &str) -> ScanResult<Scan> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                r#"
                INSERT INTO scans (url, status)
                VALUES ($1, 'pending')
                RETURNING id, url, status, created_at, started_at, completed_at, error_message
                "#,
                &[&url],
            )
            .await?;
        scan_from_row(&row)
    }

    async fn get_scan(&self, id: i64) -> ScanResult<Scan> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                r#"
                SELECT id, url, status, created_at, started_at, completed_at, error_message
                FROM scans
                WHERE id = $1
                "#,
                &[&id],
            )
            .await?
            .ok_or(ScanError::NotFound(id))?;
        scan_from_row(&row)
    }

    async fn list_scans(&self) -> ScanResult<Vec<Scan>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"
                SELECT id, url, status, created_at, started_at, completed_at, error_message
                FROM scans
                ORDER BY created_at DESC, id DESC
                "#,
                &[],
            )
            .await?;
        rows.iter().map(scan_from_row).collect()
    }

    async fn mark_started(&self, id: i64, started_at: DateTime<Utc>) -> ScanResult<()> {
        let client = self.pool.get().await?;
        let updated = client
            .execute(
                "UPDATE scans SET status = 'running', started_at = $2 WHERE id = $1",
                &[&id, &started_at],
            )
            .await?;
        if updated == 0 {
            return Err(ScanError::NotFound(id));
        }
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
        let mut client = self.pool.get().await?;
        let transaction = client.transaction().await?;

        let updated = transaction
            .execute(
                r#"
                UPDATE scans
                SET status = $2, completed_at = $3, error_message = $4
                WHERE id = $1
                "#,
                &[&id, &status.as_str(), &completed_at, &error_message],
            )
            .await?;
        if updated == 0 {
            // Rolls back on drop
            return Err(ScanError::NotFound(id));
        }

        transaction
            .execute("DELETE FROM findings WHERE scan_id = $1", &[&id])
            .await?;

        let insert = transaction
            .prepare(
                r#"
                INSERT INTO findings
                    (scan_id, category, severity, location, payload, description, remediation, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .await?;
        for finding in &findings {
            transaction
                .execute(
                    &insert,
                    &[
                        &id,
                        &finding.category.as_str(),
                        &finding.severity.as_str(),
                        &finding.location,
                        &finding.payload,
                        &finding.description,
                        &finding.remediation,
                        &completed_at,
                    ],
                )
                .await?;
        }

        transaction.commit().await?;
        Ok(())
    }

    async fn findings_for_scan(&self, scan_id: i64) -> ScanResult<Vec<Finding>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"
                SELECT id, scan_id, category, severity, location, payload,
                       description, remediation, created_at
                FROM findings
                WHERE scan_id = $1
                ORDER BY id
                "#,
                &[&scan_id],
            )
            .await?;
        rows.iter().map(finding_from_row).collect()
    }

    async fn delete_scan(&self, id: i64) -> ScanResult<()> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute("DELETE FROM scans WHERE id = $1", &[&id])
            .await?;
        if deleted == 0 {
            return Err(ScanError::NotFound(id));
        }
        Ok(())
    }
}

// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a scan job
///
/// `Pending` is the initial state; `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Pending => "pending",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ScanStatus::Pending),
            "running" => Some(ScanStatus::Running),
            "completed" => Some(ScanStatus::Completed),
            "failed" => Some(ScanStatus::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One scan job tracked from submission to terminal outcome
///
/// `started_at` is recorded when the job leaves `Pending`; `completed_at`
/// and `error_message` are recorded together with the terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scan {
    pub id: i64,
    pub url: String,
    pub status: ScanStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Vulnerability category probed by the scanner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VulnCategory {
    SqlInjection,
    Xss,
}

impl VulnCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VulnCategory::SqlInjection => "sql_injection",
            VulnCategory::Xss => "xss",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sql_injection" => Some(VulnCategory::SqlInjection),
            "xss" => Some(VulnCategory::Xss),
            _ => None,
        }
    }

    /// Severity is fixed per category
    pub fn severity(&self) -> Severity {
        match self {
            VulnCategory::SqlInjection => Severity::High,
            VulnCategory::Xss => Severity::Medium,
        }
    }
}

impl std::fmt::Display for VulnCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A vulnerability produced by the probe engine, before it has been
/// persisted against a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFinding {
    pub category: VulnCategory,
    pub severity: Severity,
    pub location: String,
    pub payload: String,
    pub description: String,
    pub remediation: String,
}

/// A persisted vulnerability finding owned by exactly one scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: i64,
    pub scan_id: i64,
    pub category: VulnCategory,
    pub severity: Severity,
    pub location: String,
    pub payload: String,
    pub description: String,
    pub remediation: String,
    pub created_at: DateTime<Utc>,
}

/// Scan together with its findings, returned by the polling endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan: Scan,
    pub findings: Vec<Finding>,
}

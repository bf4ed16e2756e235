// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scan Orchestrator
//!
//! One detached task per submitted scan: start the job, run the probe
//! engine, drive the job to a terminal state. The submission path never
//! awaits the task; callers poll the job by id to observe the outcome.
//!
//! There is no admission control and no cancellation. Concurrent scans,
//! including scans of the same target, run uncoordinated; the store is their
//! only shared state.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::errors::ScanError;
use crate::lifecycle::ScanLifecycle;
use crate::scanner::ProbeEngine;

/// Spawn the orchestration task for a freshly created scan
///
/// Called exactly once per scan, from the submission path. The returned
/// handle is dropped by production callers; tests may await it.
pub fn spawn_scan(
    lifecycle: Arc<ScanLifecycle>,
    engine: Arc<ProbeEngine>,
    scan_id: i64,
    target_url: String,
) -> JoinHandle<()> {
    tokio::spawn(run_scan(lifecycle, engine, scan_id, target_url))
}

/// Drive one scan job from `Pending` to a terminal state
///
/// Start and probe failures are converted into a `Failed` terminal state
/// with a human-readable message. Exactly one terminal transition is
/// attempted; if it fails, the job is left non-terminal with no automatic
/// recovery.
async fn run_scan(
    lifecycle: Arc<ScanLifecycle>,
    engine: Arc<ProbeEngine>,
    scan_id: i64,
    target_url: String,
) {
    if let Err(e) = lifecycle.start(scan_id).await {
        report_failure(&lifecycle, scan_id, e).await;
        return;
    }

    match engine.probe(&target_url).await {
        Ok(findings) => {
            if let Err(e) = lifecycle.complete(scan_id, findings, None).await {
                error!(scan_id, error = %e, "scan left non-terminal: completion failed");
            }
        }
        Err(e) => report_failure(&lifecycle, scan_id, e).await,
    }
}

async fn report_failure(lifecycle: &ScanLifecycle, scan_id: i64, err: ScanError) {
    warn!(scan_id, error = %err, "scan failed");
    if let Err(e) = lifecycle
        .complete(scan_id, Vec::new(), Some(err.to_string()))
        .await
    {
        error!(scan_id, error = %e, "scan left non-terminal: failure report failed");
    }
}

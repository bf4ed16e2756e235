// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Pulse Security - HTTP API
 * Scan submission, polling, and deletion endpoints
 *
 * @copyright 2026 Pulse Security Oy
 * @license Proprietary
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::errors::ScanError;
use crate::lifecycle::ScanLifecycle;
use crate::orchestrator;
use crate::scanner::ProbeEngine;

/// Shared handler state
pub struct ApiState {
    pub lifecycle: Arc<ScanLifecycle>,
    pub engine: Arc<ProbeEngine>,
}

/// Common response envelope: `success` plus either `data` or `error`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Error half of the envelope, with the HTTP status derived from the error
/// kind
struct ApiError(ScanError);

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ScanError::EmptyUrl | ScanError::InvalidTarget { .. } => StatusCode::BAD_REQUEST,
            ScanError::NotFound(_) => StatusCode::NOT_FOUND,
            ScanError::InvalidTransition { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
        }

        let body = json!({
            "success": false,
            "error": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/scans", post(create_scan).get(list_scans))
        .route("/api/scans/:id", get(get_scan).delete(delete_scan))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CreateScanRequest {
    url: String,
}

async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(json!({ "status": "ok" })))
}

/// POST /api/scans
///
/// Returns the Pending scan immediately; the orchestration task runs
/// detached and the caller polls for the outcome.
async fn create_scan(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateScanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let scan = state.lifecycle.submit(&request.url).await?;

    orchestrator::spawn_scan(
        Arc::clone(&state.lifecycle),
        Arc::clone(&state.engine),
        scan.id,
        scan.url.clone(),
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(scan))))
}

/// GET /api/scans
async fn list_scans(
    State(state): State<Arc<ApiState>>,
) -> Result<impl IntoResponse, ApiError> {
    let scans = state.lifecycle.list().await?;
    Ok(Json(ApiResponse::ok(scans)))
}

/// GET /api/scans/:id
async fn get_scan(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.lifecycle.report(id).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// DELETE /api/scans/:id
async fn delete_scan(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.lifecycle.delete(id).await?;
    Ok(Json(ApiResponse::<serde_json::Value>::ok(json!(null))))
}

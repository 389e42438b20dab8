use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReadinessChecks {
    pub database: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub checks: HealthReadinessChecks,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub database: bool,
}

/// `GET /api/system/health`
pub async fn health_live() -> Json<HealthLiveResponse> {
    Json(HealthLiveResponse { status: "ok" })
}

/// `GET /api/system/ready`
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Json<HealthReadyResponse> {
    let database = state.shared.store.ping().await.is_ok();

    Json(HealthReadyResponse {
        ready: database,
        checks: HealthReadinessChecks { database },
    })
}

/// `GET /api/system/status`
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatusResponse>> {
    let database = state.shared.store.ping().await.is_ok();

    Json(ApiResponse::success(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
    }))
}

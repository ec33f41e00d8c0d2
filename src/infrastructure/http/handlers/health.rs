//! Health Handlers
//!
//! 存活检查与合成服务可达性检查

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 进程存活检查，不触达任何外部服务
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health 响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub synthesis_available: bool,
}

/// Health endpoint - 含合成服务可达性
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let synthesis_available = state.synthesis_engine.health_check().await;

    Json(HealthResponse {
        status: if synthesis_available { "ok" } else { "degraded" },
        synthesis_available,
    })
}

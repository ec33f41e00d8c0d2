//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/speech   POST  合成语音（请求体 {text, voice?, speed?}，响应 audio/mpeg）
//! - /api/health   GET   健康检查（含合成服务可达性）
//! - /api/ping     GET   存活检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .route("/speech", post(handlers::synthesize_speech))
}

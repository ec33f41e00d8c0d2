//! HTTP Error Handling
//!
//! 应用层/合成错误到 HTTP 响应的统一映射：
//! - 参数错误 → 400
//! - 凭证未配置 → 500
//! - provider 失败 → 原样转发 provider 状态码
//! - 其余内部错误 → 500，细节仅记录日志不外泄

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ports::SynthesisError;
use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 请求参数缺失或非法
    BadRequest(String),
    /// 合成凭证未配置
    MissingApiKey,
    /// provider 返回非成功状态
    Provider { status: u16, message: String },
    /// 其他内部错误
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::MissingApiKey => {
                tracing::error!("Speech request rejected: API key not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "OpenAI API key not configured".to_string(),
                )
            }
            ApiError::Provider { status, message } => {
                tracing::error!(status, error = %message, "Synthesis provider error");
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    format!("OpenAI API error: {} - {}", status, message),
                )
            }
            ApiError::Internal(msg) => {
                // 内部细节只进日志，响应体保持通用信息
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::Validation(msg) => ApiError::BadRequest(msg),
            ApplicationError::Synthesis(SynthesisError::MissingApiKey) => ApiError::MissingApiKey,
            ApplicationError::Synthesis(SynthesisError::Provider { status, message }) => {
                ApiError::Provider { status, message }
            }
            ApplicationError::Synthesis(e) => ApiError::Internal(e.to_string()),
            ApplicationError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

//! 应用层错误定义
//!
//! 统一的命令处理错误类型

use thiserror::Error;

use crate::application::ports::SynthesisError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    Validation(String),

    /// 合成错误（凭证、provider、网络）
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

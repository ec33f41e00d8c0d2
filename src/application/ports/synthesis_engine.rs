//! Synthesis Port - 语音合成引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use thiserror::Error;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// 凭证未配置，需要运维介入，不重试
    #[error("API key not configured")]
    MissingApiKey,

    /// 合成服务返回非成功状态，状态码原样保留供上层转发
    #[error("Provider error: HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 合成请求
///
/// 片段文本与合成参数的值对象，无状态
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本（单个片段）
    pub text: String,
    /// 音色标识
    pub voice: String,
    /// 语速倍率
    pub speed: f32,
}

/// 传输层音频字节流
///
/// 单片段 fast path 直通使用，不在本地缓冲
pub type AudioByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, SynthesisError>> + Send>>;

/// Synthesis Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait SynthesisPort: Send + Sync {
    /// 合成单个片段，返回完整音频数据
    ///
    /// 多片段拼接路径使用：每个片段的结果完整落地后才发起下一次调用
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, SynthesisError>;

    /// 合成单个片段，返回传输层字节流
    ///
    /// 单片段 fast path 使用，响应体不经过本地缓冲直接透传
    async fn synthesize_stream(
        &self,
        request: SynthesisRequest,
    ) -> Result<AudioByteStream, SynthesisError>;

    /// 检查合成服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}

//! OpenAI Speech Client - 调用 OpenAI 兼容的语音合成服务
//!
//! 实现 SynthesisPort trait，通过 HTTP 调用 /v1/audio/speech
//!
//! 外部 API:
//! POST {base_url}/v1/audio/speech
//! Request: {"model": "...", "input": "...", "voice": "...", "response_format": "mp3", "speed": 1.0}  (JSON)
//! Response: audio/mpeg binary，失败时为 JSON 错误体

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    AudioByteStream, SynthesisError, SynthesisPort, SynthesisRequest,
};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    /// 合成模型
    model: &'a str,
    /// 要合成的文本
    input: &'a str,
    /// 音色标识
    voice: &'a str,
    /// 输出格式，固定 mp3
    response_format: &'a str,
    /// 语速倍率
    speed: f32,
}

/// OpenAI Speech 客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiSpeechClientConfig {
    /// 合成服务基础 URL
    pub base_url: String,
    /// API 凭证，未配置时每次合成请求返回 MissingApiKey
    pub api_key: Option<String>,
    /// 合成模型
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for OpenAiSpeechClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            model: "tts-1".to_string(),
            timeout_secs: 120,
        }
    }
}

impl OpenAiSpeechClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// OpenAI Speech 客户端
///
/// 通过 HTTP 调用 OpenAI 兼容的语音合成服务
pub struct OpenAiSpeechClient {
    client: Client,
    config: OpenAiSpeechClientConfig,
}

impl OpenAiSpeechClient {
    /// 创建新的合成客户端
    pub fn new(config: OpenAiSpeechClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 使用默认配置创建客户端
    pub fn with_default_config() -> Result<Self, SynthesisError> {
        Self::new(OpenAiSpeechClientConfig::default())
    }

    /// 获取合成 URL
    fn speech_url(&self) -> String {
        format!("{}/v1/audio/speech", self.config.base_url)
    }

    /// 获取模型列表 URL（健康检查用）
    fn models_url(&self) -> String {
        format!("{}/v1/models", self.config.base_url)
    }

    /// 获取已配置的凭证
    fn api_key(&self) -> Result<&str, SynthesisError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(SynthesisError::MissingApiKey)
    }

    /// 发送合成请求，失败状态转为 SynthesisError
    async fn send_request(
        &self,
        request: &SynthesisRequest,
    ) -> Result<reqwest::Response, SynthesisError> {
        let api_key = self.api_key()?;

        let body = SpeechHttpRequest {
            model: &self.config.model,
            input: &request.text,
            voice: &request.voice,
            response_format: "mp3",
            speed: request.speed,
        };

        tracing::debug!(
            url = %self.speech_url(),
            text_chars = request.text.chars().count(),
            voice = %request.voice,
            speed = request.speed,
            "Sending speech synthesis request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::Network(format!("Cannot connect to synthesis service: {}", e))
                } else {
                    SynthesisError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Provider {
                status: status.as_u16(),
                message: extract_error_message(&detail),
            });
        }

        Ok(response)
    }
}

/// 从 provider 错误响应体中提取可读信息
///
/// OpenAI 风格错误体: {"error": {"message": "...", ...}}，
/// 解析失败时原样返回响应体
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")?
                .get("message")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl SynthesisPort for OpenAiSpeechClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        let response = self.send_request(&request).await?;

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::debug!(
            audio_size = audio_data.len(),
            "Speech synthesis request completed"
        );

        Ok(audio_data)
    }

    async fn synthesize_stream(
        &self,
        request: SynthesisRequest,
    ) -> Result<AudioByteStream, SynthesisError> {
        let response = self.send_request(&request).await?;

        let stream = response
            .bytes_stream()
            .map_ok(|chunk| chunk.to_vec())
            .map_err(|e| SynthesisError::Network(e.to_string()));

        Ok(Box::pin(stream))
    }

    async fn health_check(&self) -> bool {
        let api_key = match self.api_key() {
            Ok(key) => key,
            Err(_) => return false,
        };

        match self
            .client
            .get(self.models_url())
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

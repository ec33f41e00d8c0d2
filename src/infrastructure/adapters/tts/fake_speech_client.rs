//! Fake Speech Client - 用于测试的合成客户端
//!
//! 不调用外部服务，按配置返回固定音频或注入失败，
//! 并记录收到的全部合成请求供断言

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{
    AudioByteStream, SynthesisError, SynthesisPort, SynthesisRequest,
};

/// Fake Speech Client 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechClientConfig {
    /// 每次调用返回的固定音频数据
    pub audio_data: Vec<u8>,
    /// 第 N 次调用返回失败（从 1 开始计数），None 表示永不失败
    pub fail_on_call: Option<usize>,
    /// 注入失败时返回的状态码
    pub fail_status: u16,
    /// 注入失败时返回的错误信息
    pub fail_message: String,
    /// 模拟的合成延迟（毫秒）
    pub delay_ms: u64,
}

impl Default for FakeSpeechClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"fake-mp3-bytes".to_vec(),
            fail_on_call: None,
            fail_status: 500,
            fail_message: "injected failure".to_string(),
            delay_ms: 0,
        }
    }
}

/// Fake Speech Client
///
/// 用于测试，返回配置的固定音频，可在指定调用次序注入失败
pub struct FakeSpeechClient {
    config: FakeSpeechClientConfig,
    /// 已收到的合成请求（按调用顺序）
    calls: Mutex<Vec<SynthesisRequest>>,
}

impl FakeSpeechClient {
    /// 创建新的 FakeSpeechClient
    pub fn new(config: FakeSpeechClientConfig) -> Self {
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 使用固定音频数据创建
    pub fn with_audio(audio_data: Vec<u8>) -> Self {
        Self::new(FakeSpeechClientConfig {
            audio_data,
            ..Default::default()
        })
    }

    /// 已收到的调用次数
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// 已收到的合成请求（按调用顺序）
    pub fn calls(&self) -> Vec<SynthesisRequest> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<SynthesisRequest>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn next_result(&self, request: SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        let call_number = {
            let mut calls = self.lock_calls();
            calls.push(request);
            calls.len()
        };

        if self.config.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.delay_ms)).await;
        }

        if self.config.fail_on_call == Some(call_number) {
            return Err(SynthesisError::Provider {
                status: self.config.fail_status,
                message: self.config.fail_message.clone(),
            });
        }

        Ok(self.config.audio_data.clone())
    }
}

#[async_trait]
impl SynthesisPort for FakeSpeechClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        self.next_result(request).await
    }

    async fn synthesize_stream(
        &self,
        request: SynthesisRequest,
    ) -> Result<AudioByteStream, SynthesisError> {
        let data = self.next_result(request).await?;
        Ok(Box::pin(futures_util::stream::iter(vec![
            Ok::<_, SynthesisError>(data),
        ])))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> SynthesisRequest {
        SynthesisRequest {
            text: text.to_string(),
            voice: "sage".to_string(),
            speed: 1.0,
        }
    }

    #[tokio::test]
    async fn test_returns_fixed_audio_and_records_calls() {
        let client = FakeSpeechClient::with_audio(b"abc".to_vec());

        let first = client.synthesize(request("one")).await.unwrap();
        let second = client.synthesize(request("two")).await.unwrap();

        assert_eq!(first, b"abc");
        assert_eq!(second, b"abc");
        assert_eq!(client.call_count(), 2);
        assert_eq!(client.calls()[0].text, "one");
        assert_eq!(client.calls()[1].text, "two");
    }

    #[tokio::test]
    async fn test_fails_on_scheduled_call() {
        let client = FakeSpeechClient::new(FakeSpeechClientConfig {
            fail_on_call: Some(2),
            fail_status: 429,
            fail_message: "too many requests".to_string(),
            ..Default::default()
        });

        assert!(client.synthesize(request("one")).await.is_ok());

        let result = client.synthesize(request("two")).await;
        match result {
            Err(SynthesisError::Provider { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "too many requests");
            }
            _ => panic!("expected injected provider error"),
        }
    }
}

//! Speech Command Handlers
//!
//! 合成命令处理器：分块 → 顺序合成 → 拼接
//!
//! 单片段走 fast path（一次调用，字节流直通）；
//! 多片段走 slow path（严格按序号顺序逐段合成，完整落地后一次性拼接）。
//! 任一段合成失败整个操作立即中止，不返回部分音频，内部不重试

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::SynthesizeSpeechCommand;
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioByteStream, SynthesisPort, SynthesisRequest};
use crate::domain::{chunk_text, ChunkConfig, Segment};

/// 合成结果
pub enum SpeechAudio {
    /// fast path：单片段，provider 字节流直通
    Stream(AudioByteStream),
    /// slow path：多片段顺序合成后的拼接结果
    Buffer(Vec<u8>),
}

/// SynthesizeSpeech Handler
///
/// 每次 handle 调用独占自己的片段序列和缓冲列表，
/// 多个请求之间无共享可变状态
pub struct SynthesizeSpeechHandler {
    synthesis_engine: Arc<dyn SynthesisPort>,
    chunk_config: ChunkConfig,
}

impl SynthesizeSpeechHandler {
    pub fn new(synthesis_engine: Arc<dyn SynthesisPort>, chunk_config: ChunkConfig) -> Self {
        Self {
            synthesis_engine,
            chunk_config,
        }
    }

    /// 执行合成
    pub async fn handle(
        &self,
        command: SynthesizeSpeechCommand,
    ) -> Result<SpeechAudio, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text parameter is required"));
        }

        let request_id = Uuid::new_v4();
        let segments = chunk_text(&command.text, &self.chunk_config);

        tracing::info!(
            request_id = %request_id,
            text_chars = command.text.chars().count(),
            total_segments = segments.len(),
            voice = %command.voice,
            speed = command.speed,
            "Speech synthesis started"
        );

        if segments.len() == 1 {
            // fast path：仅一次合成调用，响应字节流直通，省去拼接
            let stream = self
                .synthesis_engine
                .synthesize_stream(self.synthesis_request(&segments[0], &command))
                .await?;

            tracing::info!(
                request_id = %request_id,
                "Speech synthesis streaming single segment"
            );
            return Ok(SpeechAudio::Stream(stream));
        }

        // slow path：严格按片段序号顺序合成，每段完整落地后再发起下一段。
        // 任一段失败立即中止，已取回的缓冲随 buffers 一起丢弃
        let mut buffers: Vec<Vec<u8>> = Vec::with_capacity(segments.len());
        for segment in &segments {
            tracing::debug!(
                request_id = %request_id,
                segment_index = segment.index,
                segment_chars = segment.chars,
                "Synthesizing segment"
            );

            let audio = self
                .synthesis_engine
                .synthesize(self.synthesis_request(segment, &command))
                .await?;
            buffers.push(audio);
        }

        // 先算总长一次性分配，再按片段顺序拷贝
        let total_len: usize = buffers.iter().map(|b| b.len()).sum();
        let mut assembled = Vec::with_capacity(total_len);
        for buffer in &buffers {
            assembled.extend_from_slice(buffer);
        }

        tracing::info!(
            request_id = %request_id,
            total_segments = segments.len(),
            audio_size = assembled.len(),
            "Speech synthesis assembled"
        );

        Ok(SpeechAudio::Buffer(assembled))
    }

    fn synthesis_request(
        &self,
        segment: &Segment,
        command: &SynthesizeSpeechCommand,
    ) -> SynthesisRequest {
        SynthesisRequest {
            text: segment.text.clone(),
            voice: command.voice.clone(),
            speed: command.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SynthesisError;
    use async_trait::async_trait;
    use futures_util::StreamExt;
    use std::sync::Mutex;

    /// 记录每次调用并返回带序号标记音频的合成引擎
    struct ScriptedEngine {
        calls: Mutex<Vec<SynthesisRequest>>,
        fail_on_call: Option<usize>,
    }

    impl ScriptedEngine {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_call: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_call: Some(call),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn texts(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|r| r.text.clone()).collect()
        }

        fn record(&self, request: SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
            let call_number = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(request);
                calls.len()
            };
            if self.fail_on_call == Some(call_number) {
                return Err(SynthesisError::Provider {
                    status: 502,
                    message: "injected failure".to_string(),
                });
            }
            Ok(format!("<audio-{}>", call_number).into_bytes())
        }
    }

    #[async_trait]
    impl SynthesisPort for ScriptedEngine {
        async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
            self.record(request)
        }

        async fn synthesize_stream(
            &self,
            request: SynthesisRequest,
        ) -> Result<AudioByteStream, SynthesisError> {
            let data = self.record(request)?;
            Ok(Box::pin(futures_util::stream::iter(vec![
                Ok::<_, SynthesisError>(data),
            ])))
        }
    }

    fn handler(engine: Arc<ScriptedEngine>, max_chunk_chars: usize) -> SynthesizeSpeechHandler {
        SynthesizeSpeechHandler::new(engine, ChunkConfig { max_chunk_chars })
    }

    fn command(text: &str) -> SynthesizeSpeechCommand {
        SynthesizeSpeechCommand {
            text: text.to_string(),
            voice: "sage".to_string(),
            speed: 1.0,
        }
    }

    async fn collect(mut stream: AudioByteStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend(chunk.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_single_segment_fast_path_issues_one_call() {
        let engine = Arc::new(ScriptedEngine::new());
        let handler = handler(engine.clone(), 100);

        let result = handler.handle(command("Short text.")).await.unwrap();

        match result {
            SpeechAudio::Stream(stream) => {
                assert_eq!(collect(stream).await, b"<audio-1>");
            }
            SpeechAudio::Buffer(_) => panic!("expected fast path stream"),
        }
        assert_eq!(engine.call_count(), 1);
        assert_eq!(engine.texts(), vec!["Short text."]);
    }

    #[tokio::test]
    async fn test_multi_segment_assembly_in_index_order() {
        let engine = Arc::new(ScriptedEngine::new());
        let handler = handler(engine.clone(), 20);

        let result = handler
            .handle(command("Hello world. This is a test of chunking."))
            .await
            .unwrap();

        match result {
            SpeechAudio::Buffer(audio) => {
                assert_eq!(audio, b"<audio-1><audio-2><audio-3>");
            }
            SpeechAudio::Stream(_) => panic!("expected slow path buffer"),
        }
        assert_eq!(
            engine.texts(),
            vec!["Hello world.", "This is a test of", "chunking."]
        );
    }

    #[tokio::test]
    async fn test_failure_aborts_before_later_segments() {
        let engine = Arc::new(ScriptedEngine::failing_on(2));
        let handler = handler(engine.clone(), 20);

        let result = handler
            .handle(command("Hello world. This is a test of chunking."))
            .await;

        match result {
            Err(ApplicationError::Synthesis(SynthesisError::Provider { status, .. })) => {
                assert_eq!(status, 502);
            }
            other => panic!("expected provider error, got {:?}", other.is_ok()),
        }
        // 第 3 段从未被请求
        assert_eq!(engine.call_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_text_rejected_without_synthesis() {
        let engine = Arc::new(ScriptedEngine::new());
        let handler = handler(engine.clone(), 100);

        let result = handler.handle(command("   ")).await;

        assert!(matches!(result, Err(ApplicationError::Validation(_))));
        assert_eq!(engine.call_count(), 0);
    }

    #[tokio::test]
    async fn test_assembled_length_is_sum_of_buffers() {
        let engine = Arc::new(ScriptedEngine::new());
        let handler = handler(engine.clone(), 20);

        let result = handler
            .handle(command("One two three four. Five six seven eight. Nine ten."))
            .await
            .unwrap();

        let expected_len: usize = (1..=engine.call_count()).map(|n| format!("<audio-{}>", n).len()).sum();
        match result {
            SpeechAudio::Buffer(audio) => assert_eq!(audio.len(), expected_len),
            SpeechAudio::Stream(_) => panic!("expected slow path buffer"),
        }
    }
}

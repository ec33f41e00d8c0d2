//! Application State
//!
//! 所有请求共享的只读状态：端口与命令处理器。
//! 每个请求独占自己的片段序列与缓冲，状态本身无可变共享

use std::sync::Arc;

use crate::application::ports::SynthesisPort;
use crate::application::SynthesizeSpeechHandler;
use crate::domain::ChunkConfig;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub synthesis_engine: Arc<dyn SynthesisPort>,

    // ========== Command Handlers ==========
    pub synthesize_speech_handler: SynthesizeSpeechHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(synthesis_engine: Arc<dyn SynthesisPort>, chunk_config: ChunkConfig) -> Self {
        Self {
            synthesis_engine: synthesis_engine.clone(),
            synthesize_speech_handler: SynthesizeSpeechHandler::new(
                synthesis_engine,
                chunk_config,
            ),
        }
    }
}

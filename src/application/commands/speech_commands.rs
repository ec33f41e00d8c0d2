//! Speech Commands
//!
//! 语音合成命令定义

/// 合成命令：将完整文本转为一段可播放音频
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechCommand {
    /// 完整文本
    pub text: String,
    /// 音色标识
    pub voice: String,
    /// 语速倍率
    pub speed: f32,
}

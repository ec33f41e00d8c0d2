//! 应用层 - 命令（写操作）
//!
//! 语音合成命令及处理器

mod speech_commands;

pub mod handlers;

pub use speech_commands::*;

pub use handlers::{SpeechAudio, SynthesizeSpeechHandler};

//! 命令处理器

mod speech_handlers;

pub use speech_handlers::{SpeechAudio, SynthesizeSpeechHandler};

//! CommutIQ Speech - 长文本语音合成服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - TextChunker: 段落 → 句子 → 单词 三级贪心分块算法
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SynthesisPort）
//! - Commands: 合成命令处理器（分块 → 顺序合成 → 拼接）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（/api/speech）
//! - Adapters: OpenAI 兼容的语音合成客户端、测试用 Fake 客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};

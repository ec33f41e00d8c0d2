//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::DEFAULT_MAX_CHUNK_CHARS;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 合成服务配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 文本分块配置
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 合成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// 合成服务基础 URL（OpenAI 兼容）
    #[serde(default = "default_synthesis_url")]
    pub base_url: String,

    /// API 凭证
    /// 未配置时服务仍可启动，合成请求返回 500
    #[serde(default)]
    pub api_key: Option<String>,

    /// 合成模型
    #[serde(default = "default_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_synthesis_timeout")]
    pub timeout_secs: u64,
}

fn default_synthesis_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "tts-1".to_string()
}

fn default_synthesis_timeout() -> u64 {
    120
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            base_url: default_synthesis_url(),
            api_key: None,
            model: default_model(),
            timeout_secs: default_synthesis_timeout(),
        }
    }
}

/// 文本分块配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    /// 单个片段的最大字符数
    /// 与合成服务单次请求的输入上限一致
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

fn default_max_chunk_chars() -> usize {
    DEFAULT_MAX_CHUNK_CHARS
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

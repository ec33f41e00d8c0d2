//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `COMMUTIQ_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `COMMUTIQ_SERVER__HOST=127.0.0.1`
/// - `COMMUTIQ_SERVER__PORT=8080`
/// - `COMMUTIQ_SYNTHESIS__API_KEY=sk-...`
/// - `COMMUTIQ_CHUNKING__MAX_CHUNK_CHARS=2048`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("synthesis.base_url", "https://api.openai.com")?
        .set_default("synthesis.model", "tts-1")?
        .set_default("synthesis.timeout_secs", 120)?
        .set_default("chunking.max_chunk_chars", 4096)?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: COMMUTIQ_
    // 层级分隔符: __ (双下划线)
    // 例如: COMMUTIQ_SYNTHESIS__API_KEY=sk-...
    builder = builder.add_source(
        Environment::with_prefix("COMMUTIQ")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证合成服务 URL
    if config.synthesis.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Synthesis base URL cannot be empty".to_string(),
        ));
    }

    // 验证分块上限
    if config.chunking.max_chunk_chars == 0 {
        return Err(ConfigError::ValidationError(
            "Max chunk chars cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
///
/// API key 只打印是否已配置，不打印内容
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Synthesis URL: {}", config.synthesis.base_url);
    tracing::info!("Synthesis Model: {}", config.synthesis.model);
    tracing::info!("Synthesis Timeout: {}s", config.synthesis.timeout_secs);
    match &config.synthesis.api_key {
        Some(key) if !key.is_empty() => tracing::info!("Synthesis API Key: configured"),
        _ => tracing::warn!("Synthesis API Key: NOT configured, speech requests will fail"),
    }
    tracing::info!("Max Chunk Chars: {}", config.chunking.max_chunk_chars);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

//! CommutIQ Speech - 长文本语音合成服务
//!
//! 启动流程: 配置加载 → 日志初始化 → 合成客户端 → HTTP 服务器（优雅关闭）

use std::sync::Arc;

use commutiq_speech::config::{load_config, print_config};
use commutiq_speech::domain::ChunkConfig;
use commutiq_speech::infrastructure::adapters::{OpenAiSpeechClient, OpenAiSpeechClientConfig};
use commutiq_speech::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},commutiq_speech={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("CommutIQ Speech - 长文本语音合成服务");
    print_config(&config);

    // 创建合成客户端
    let synthesis_config = OpenAiSpeechClientConfig {
        base_url: config.synthesis.base_url.clone(),
        api_key: config.synthesis.api_key.clone(),
        model: config.synthesis.model.clone(),
        timeout_secs: config.synthesis.timeout_secs,
    };
    let synthesis_engine = Arc::new(OpenAiSpeechClient::new(synthesis_config)?);

    // 分块配置
    let chunk_config = ChunkConfig {
        max_chunk_chars: config.chunking.max_chunk_chars,
    };

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(synthesis_engine, chunk_config);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

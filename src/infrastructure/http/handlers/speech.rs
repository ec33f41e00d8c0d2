//! Speech Handler
//!
//! POST /api/speech：接收完整文本，返回合成后的 audio/mpeg。
//! 单片段结果直接透传 provider 字节流，多片段结果为拼接完成的缓冲

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::{SpeechAudio, SynthesizeSpeechCommand};
use crate::infrastructure::http::dto::SpeechRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 成功响应的缓存策略
const CACHE_CONTROL: &str = "public, max-age=3600";

pub async fn synthesize_speech(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeechRequest>,
) -> Result<Response, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text parameter is required".to_string()));
    }

    let command = SynthesizeSpeechCommand {
        text: req.text,
        voice: req.voice,
        speed: req.speed,
    };

    let audio = state.synthesize_speech_handler.handle(command).await?;

    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(header::CACHE_CONTROL, CACHE_CONTROL);

    let response = match audio {
        SpeechAudio::Buffer(data) => builder
            .header(header::CONTENT_LENGTH, data.len())
            .body(Body::from(data)),
        SpeechAudio::Stream(stream) => builder.body(Body::from_stream(stream)),
    };

    response.map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

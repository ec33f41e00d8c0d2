//! Data Transfer Objects

use serde::Deserialize;

/// 语音合成请求
///
/// text 缺失时反序列化为空串，由 handler 统一返回 400
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    /// 要合成的完整文本
    #[serde(default)]
    pub text: String,

    /// 音色标识
    #[serde(default = "default_voice")]
    pub voice: String,

    /// 语速倍率
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_voice() -> String {
    "sage".to_string()
}

fn default_speed() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_for_missing_fields() {
        let request: SpeechRequest = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(request.text, "hello");
        assert_eq!(request.voice, "sage");
        assert_eq!(request.speed, 1.0);
    }

    #[test]
    fn test_missing_text_becomes_empty() {
        let request: SpeechRequest = serde_json::from_str(r#"{"voice": "alloy"}"#).unwrap();
        assert!(request.text.is_empty());
        assert_eq!(request.voice, "alloy");
    }

    #[test]
    fn test_explicit_fields_kept() {
        let request: SpeechRequest =
            serde_json::from_str(r#"{"text": "hi", "voice": "echo", "speed": 1.5}"#).unwrap();
        assert_eq!(request.voice, "echo");
        assert_eq!(request.speed, 1.5);
    }
}

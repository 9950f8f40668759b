// 发音服务模块
// 定义朗读意大利语数词的调用契约
//
// 引擎侧只定义 best-effort 契约：实现方可用系统 TTS、Web Speech API
// 或任何后端；不可用时调用方降级为记录警告，正确性从不依赖发音。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 意大利语的 BCP 47 语言标签
pub const ITALIAN_LANGUAGE_TAG: &str = "it-IT";

/// 发音配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// 语言代码 (如 "it-IT")
    pub language: String,
    /// 语速 (0.5 - 2.0, 1.0 为正常)
    pub rate: f32,
    /// 音调 (0.5 - 2.0, 1.0 为正常)
    pub pitch: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: ITALIAN_LANGUAGE_TAG.to_string(),
            rate: 0.9, // 稍慢一点，便于学习
            pitch: 1.0,
        }
    }
}

/// 发音服务错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("speech synthesis is not supported on this platform")]
    NotSupported,

    #[error("speech synthesis failed: {0}")]
    SpeakFailed(String),
}

/// 发音服务契约
pub trait Speaker {
    /// 朗读文本；best-effort，无返回内容，失败由调用方降级处理
    fn speak(&mut self, text: &str, config: &SpeechConfig) -> Result<(), SpeechError>;

    /// 当前实现是否真正可用
    fn is_supported(&self) -> bool;
}

/// 不支持发音的实现
///
/// 用于测试和没有音频能力的宿主；`speak` 恒返回 NotSupported。
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&mut self, _text: &str, _config: &SpeechConfig) -> Result<(), SpeechError> {
        Err(SpeechError::NotSupported)
    }

    fn is_supported(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SpeechConfig::default();
        assert_eq!(config.language, ITALIAN_LANGUAGE_TAG);
        assert!(config.rate > 0.0);
        assert!(config.pitch > 0.0);
    }

    #[test]
    fn test_null_speaker_is_unsupported() {
        let mut speaker = NullSpeaker;
        assert!(!speaker.is_supported());
        assert_eq!(
            speaker.speak("venti", &SpeechConfig::default()),
            Err(SpeechError::NotSupported)
        );
    }

    #[test]
    fn test_speech_error_display() {
        assert!(SpeechError::NotSupported.to_string().contains("not supported"));
        assert!(SpeechError::SpeakFailed("no voice".into())
            .to_string()
            .contains("no voice"));
    }
}

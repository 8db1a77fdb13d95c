use crate::{
    DialogueRequest, ModelInfo, MonologueRequest, OUTPUT_SAMPLE_RATE, SpeechResponse, TTSResult,
};
use async_trait::async_trait;

/// Marker Trait for TTS providers
///
/// This trait combines all TTS capabilities into a single provider interface.
/// Request handlers hold one `Arc<dyn TTSProvider>` built at startup.
pub trait TTSProvider: TTSSpeechProvider + TTSModelsProvider + Send + Sync {
    /// Short provider name used in logs and errors
    fn provider_name(&self) -> &str;
}

/// Trait for dialogue and monologue generation
///
/// Inputs are already validated: implementations need not re-check tag syntax.
#[async_trait]
pub trait TTSSpeechProvider: Send + Sync {
    /// Generate one waveform for a whole multi-speaker script
    async fn generate_dialogue(&self, request: DialogueRequest) -> TTSResult<SpeechResponse>;

    /// Generate one waveform for a single speaker
    async fn generate_monologue(&self, request: MonologueRequest) -> TTSResult<SpeechResponse>;

    /// Get default sample rate
    fn default_sample_rate(&self) -> u32 {
        OUTPUT_SAMPLE_RATE
    }
}

/// Trait for TTS model management capabilities
#[async_trait]
pub trait TTSModelsProvider: Send + Sync {
    /// Get current model information (required)
    fn get_current_model(&self) -> ModelInfo;

    /// Get supported languages
    fn supported_languages(&self) -> Vec<String> {
        vec!["en".to_string(), "zh".to_string()]
    }
}

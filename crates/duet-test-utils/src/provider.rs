use async_trait::async_trait;
use duet_speech::{
    AudioData, DialogueRequest, ModelInfo, MonologueRequest, SpeechResponse, TTSError,
    TTSModelsProvider, TTSProvider, TTSResult, TTSSpeechProvider,
};
use std::sync::Mutex;

/// A backend call as seen by the mock
#[derive(Debug, Clone)]
pub enum RecordedCall {
    Dialogue(DialogueRequest),
    Monologue(MonologueRequest),
}

/// Provider that records every request and answers with a fixed waveform
#[derive(Debug)]
pub struct MockTTSProvider {
    pub samples: Vec<f32>,
    pub should_fail: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTTSProvider {
    pub fn new() -> Self {
        Self {
            samples: vec![0.0, 0.25, -0.25, 0.5],
            should_fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_samples(mut self, samples: Vec<f32>) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_failure(mut self, should_fail: bool) -> Self {
        self.should_fail = should_fail;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) -> TTSResult<SpeechResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.should_fail {
            return Err(TTSError::ProviderError(
                "Mock generation failure".to_string(),
                "mock".to_string(),
            ));
        }
        Ok(SpeechResponse::new(AudioData::mono(self.samples.clone())))
    }
}

impl Default for MockTTSProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TTSProvider for MockTTSProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl TTSSpeechProvider for MockTTSProvider {
    async fn generate_dialogue(&self, request: DialogueRequest) -> TTSResult<SpeechResponse> {
        self.record(RecordedCall::Dialogue(request))
    }

    async fn generate_monologue(&self, request: MonologueRequest) -> TTSResult<SpeechResponse> {
        self.record(RecordedCall::Monologue(request))
    }
}

#[async_trait]
impl TTSModelsProvider for MockTTSProvider {
    fn get_current_model(&self) -> ModelInfo {
        ModelInfo {
            id: "mock-tts".to_string(),
            name: "Mock TTS".to_string(),
            description: Some("Records requests for tests".to_string()),
            languages: vec!["en".to_string()],
        }
    }
}

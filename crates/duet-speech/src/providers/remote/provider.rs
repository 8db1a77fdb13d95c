//! Remote model-worker provider implementation

use super::config::RemoteTTSConfig;
use super::error::{RemoteTTSError, Result};
use super::wire::{
    DIALOGUE_ROUTE, DialogueBody, GenerateReply, LOAD_ROUTE, LoadBody, LoadReply, MONOLOGUE_ROUTE,
    MonologueBody,
};
use crate::{
    AudioData, DialogueRequest, ModelInfo, MonologueRequest, OUTPUT_SAMPLE_RATE, SpeechResponse,
    TTSError, TTSModelsProvider, TTSProvider, TTSResult, TTSSpeechProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Provider backed by an out-of-process inference worker
pub struct RemoteTTS {
    config: RemoteTTSConfig,
    client: Client,
    model: ModelInfo,
}

impl RemoteTTS {
    /// Ask the worker to load the pretrained model and return a ready handle.
    ///
    /// Called once at startup; the handle is then shared by every request.
    pub async fn connect(config: RemoteTTSConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteTTSError::transport(e, "client builder"))?;

        let pretrained_dir = config.pretrained_dir.to_string_lossy().to_string();
        log::info!(
            "Loading model from '{}' on {} via {}",
            pretrained_dir,
            config.device,
            config.endpoint
        );

        let body = LoadBody {
            pretrained_dir: pretrained_dir.clone(),
            gen_type: &config.gen_type,
            device: &config.device,
        };

        let reply: LoadReply = match post_json(&client, &config, LOAD_ROUTE, &body).await {
            Err(RemoteTTSError::Status(404, _, details)) => {
                return Err(RemoteTTSError::ModelNotFound(pretrained_dir, details));
            }
            other => other?,
        };

        if reply.sample_rate != OUTPUT_SAMPLE_RATE {
            return Err(RemoteTTSError::Waveform(format!(
                "worker reports {} Hz output, expected {} Hz",
                reply.sample_rate, OUTPUT_SAMPLE_RATE
            )));
        }

        log::info!("Model '{}' loaded", reply.model.name);

        Ok(Self {
            config,
            client,
            model: reply.model,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &RemoteTTSConfig {
        &self.config
    }

    async fn generate<B: Serialize + Sync>(&self, route: &str, body: &B) -> Result<AudioData> {
        let reply: GenerateReply = post_json(&self.client, &self.config, route, body).await?;
        check_waveform(reply.audio)
    }
}

async fn post_json<B, R>(
    client: &Client,
    config: &RemoteTTSConfig,
    route: &str,
    body: &B,
) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = client
        .post(config.url(route))
        .json(body)
        .send()
        .await
        .map_err(|e| RemoteTTSError::transport(e, route))?;

    let status = response.status();
    if !status.is_success() {
        let details = response.text().await.unwrap_or_default();
        log::error!("Model worker {} failed with {}: {}", route, status, details);
        return Err(RemoteTTSError::Status(
            status.as_u16(),
            route.to_string(),
            details,
        ));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| RemoteTTSError::transport(e, route))?;
    serde_json::from_slice(&bytes).map_err(|e| RemoteTTSError::decode(e.to_string(), route))
}

/// Only mono audio at the model rate is accepted for playback
fn check_waveform(audio: AudioData) -> Result<AudioData> {
    if audio.channels != 1 {
        return Err(RemoteTTSError::Waveform(format!(
            "expected mono audio, got {} channels",
            audio.channels
        )));
    }
    if audio.sample_rate != OUTPUT_SAMPLE_RATE {
        return Err(RemoteTTSError::Waveform(format!(
            "expected {} Hz audio, got {} Hz",
            OUTPUT_SAMPLE_RATE, audio.sample_rate
        )));
    }
    Ok(audio)
}

// Implement the marker trait
impl TTSProvider for RemoteTTS {
    fn provider_name(&self) -> &str {
        "remote"
    }
}

#[async_trait]
impl TTSSpeechProvider for RemoteTTS {
    async fn generate_dialogue(&self, request: DialogueRequest) -> TTSResult<SpeechResponse> {
        let utterances = request.script.len();
        let audio = self
            .generate(DIALOGUE_ROUTE, &DialogueBody::from(&request))
            .await
            .map_err(|e| match e {
                RemoteTTSError::Transport(err, _) => {
                    TTSError::GenerationFailed(err.to_string(), utterances)
                }
                other => TTSError::from(other),
            })?;
        Ok(SpeechResponse::new(audio))
    }

    async fn generate_monologue(&self, request: MonologueRequest) -> TTSResult<SpeechResponse> {
        let audio = self
            .generate(MONOLOGUE_ROUTE, &MonologueBody::from(&request))
            .await
            .map_err(|e| match e {
                RemoteTTSError::Transport(err, _) => TTSError::GenerationFailed(err.to_string(), 1),
                other => TTSError::from(other),
            })?;
        Ok(SpeechResponse::new(audio))
    }
}

#[async_trait]
impl TTSModelsProvider for RemoteTTS {
    fn get_current_model(&self) -> ModelInfo {
        self.model.clone()
    }
}

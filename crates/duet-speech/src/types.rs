use crate::prompt::VoicePrompt;
use crate::script::DialogueScript;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sample rate of every waveform the model produces
pub const OUTPUT_SAMPLE_RATE: u32 = 24_000;

/// Model information
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    /// Model identifier
    pub id: String,
    /// Model name
    pub name: String,
    /// Model description
    pub description: Option<String>,
    /// Supported languages
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Audio data with normalized samples
#[derive(Clone, Debug, PartialEq)]
pub struct AudioData {
    /// Audio samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Number of audio channels (1 for everything the model emits)
    pub channels: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioData {
    /// Single-channel audio at the model's output rate
    pub fn mono(samples: Vec<f32>) -> Self {
        Self {
            samples,
            channels: 1,
            sample_rate: OUTPUT_SAMPLE_RATE,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0;
        }
        let frames = self.samples.len() / self.channels;
        (frames as f64 / self.sample_rate as f64 * 1000.0) as u64
    }
}

impl Serialize for AudioData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("AudioData", 3)?;

        // Serialize samples as base64
        let bytes: Vec<u8> = self.samples.iter().flat_map(|f| f.to_le_bytes()).collect();
        let base64_samples =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &bytes);

        state.serialize_field("samples", &base64_samples)?;
        state.serialize_field("channels", &self.channels)?;
        state.serialize_field("sample_rate", &self.sample_rate)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for AudioData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct AudioDataHelper {
            samples: String,
            channels: usize,
            sample_rate: u32,
        }

        let helper = AudioDataHelper::deserialize(deserializer)?;

        let bytes =
            base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &helper.samples)
                .map_err(serde::de::Error::custom)?;

        if bytes.len() % 4 != 0 {
            return Err(serde::de::Error::custom(format!(
                "sample payload of {} bytes is not a whole number of f32 samples",
                bytes.len()
            )));
        }

        let samples: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Ok(AudioData {
            samples,
            channels: helper.channels,
            sample_rate: helper.sample_rate,
        })
    }
}

/// Sampling knobs forwarded to the model
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_k: usize,
}

impl SamplingParams {
    /// Defaults for multi-speaker dialogue
    pub const DIALOGUE: SamplingParams = SamplingParams {
        temperature: 0.9,
        top_k: 30,
    };

    /// Defaults for single-speaker monologue
    pub const MONOLOGUE: SamplingParams = SamplingParams {
        temperature: 0.75,
        top_k: 20,
    };
}

/// Validated dialogue generation request
#[derive(Clone, Debug)]
pub struct DialogueRequest {
    pub script: DialogueScript,
    /// One prompt per speaker slot in voice clone mode, `None` for random voices
    pub prompts: Option<Vec<VoicePrompt>>,
    pub sampling: SamplingParams,
}

/// Validated monologue generation request
#[derive(Clone, Debug)]
pub struct MonologueRequest {
    pub text: String,
    pub prompt: Option<VoicePrompt>,
    pub sampling: SamplingParams,
}

/// Speech generation response
#[derive(Clone, Debug)]
pub struct SpeechResponse {
    pub audio: AudioData,
    pub duration_ms: u64,
}

impl SpeechResponse {
    pub fn new(audio: AudioData) -> Self {
        let duration_ms = audio.duration_ms();
        Self { audio, duration_ms }
    }
}

//! Voice modes and reference prompts for voice cloning.

use crate::error::{ValidationError, ValidationResult};
use crate::script::{SpeakerTag, validate_utterance_text};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Whether generation is conditioned on reference prompts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VoiceMode {
    #[default]
    VoiceClone,
    RandomVoice,
}

impl VoiceMode {
    /// Map a radio-button index to a mode; index 0 is voice clone
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            VoiceMode::VoiceClone
        } else {
            VoiceMode::RandomVoice
        }
    }

    /// Prompt inputs are only shown, and only required, in voice clone mode
    pub fn shows_prompt_fields(&self) -> bool {
        matches!(self, VoiceMode::VoiceClone)
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoiceMode::VoiceClone => "Voice Clone",
            VoiceMode::RandomVoice => "Random Voice",
        }
    }
}

impl fmt::Display for VoiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VoiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "voice_clone" | "clone" | "0" => Ok(VoiceMode::VoiceClone),
            "random_voice" | "random" | "1" => Ok(VoiceMode::RandomVoice),
            other => Err(format!(
                "Unknown voice mode '{}'. Expected voice_clone or random_voice",
                other
            )),
        }
    }
}

/// Reference audio handed to the backend untouched.
///
/// The bytes are never decoded here; they travel base64-encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct PromptAudio {
    /// Original file name, if known
    pub file_name: Option<String>,
    /// Raw file contents
    pub data: Vec<u8>,
}

impl PromptAudio {
    pub fn new(file_name: Option<String>, data: Vec<u8>) -> Self {
        Self { file_name, data }
    }

    /// Read a prompt file from disk without inspecting its contents
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string);
        Ok(Self { file_name, data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for PromptAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptAudio")
            .field("file_name", &self.file_name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Serialize for PromptAudio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("PromptAudio", 2)?;
        state.serialize_field("file_name", &self.file_name)?;
        state.serialize_field("data", &STANDARD.encode(&self.data))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for PromptAudio {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PromptAudioHelper {
            #[serde(default)]
            file_name: Option<String>,
            data: String,
        }

        let helper = PromptAudioHelper::deserialize(deserializer)?;
        // Browsers hand out data URLs; keep only the payload. An empty file
        // reads as a bare "data:".
        let payload = match helper.data.strip_prefix("data:") {
            Some(url) => url.split_once(',').map(|(_, payload)| payload).unwrap_or_default(),
            None => helper.data.as_str(),
        };
        let data = STANDARD
            .decode(payload.trim())
            .map_err(serde::de::Error::custom)?;

        Ok(PromptAudio {
            file_name: helper.file_name,
            data,
        })
    }
}

/// Reference audio paired with its transcript
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicePrompt {
    pub audio: PromptAudio,
    pub text: String,
}

impl VoicePrompt {
    pub fn new(audio: PromptAudio, text: impl Into<String>) -> Self {
        Self {
            audio,
            text: text.into(),
        }
    }
}

/// Presence check for one prompt slot: text must be non-empty and audio present
pub fn check_prompt_completeness(prompt_text: &str, prompt_audio_present: bool) -> bool {
    !prompt_text.is_empty() && prompt_audio_present
}

/// Gate a prompt slot before generation.
///
/// In random voice mode the prompt fields are ignored entirely.
pub fn validate_voice_clone_prompt(
    mode: VoiceMode,
    prompt_text: &str,
    prompt_audio_present: bool,
    required_tag: Option<SpeakerTag>,
) -> ValidationResult {
    if mode == VoiceMode::RandomVoice {
        return Ok(());
    }

    if !check_prompt_completeness(prompt_text, prompt_audio_present) {
        return Err(ValidationError::IncompletePrompt);
    }

    if !validate_utterance_text(prompt_text, required_tag) {
        // Only reachable through a blank transcript when no tag is required
        return Err(match required_tag {
            Some(tag) => ValidationError::InvalidPromptTag(tag),
            None => ValidationError::IncompletePrompt,
        });
    }

    Ok(())
}

//! # Duet Speech
//!
//! Input validation and TTS provider abstractions for the Duet dialogue demo.
//!
//! This crate owns everything that happens between raw user input and a call
//! into a pretrained speech-synthesis model:
//!
//! - **Tag grammar**: `[S1]`..`[S4]` speaker tags and tagged utterances
//! - **Validation**: prompt completeness, prompt tags, dialogue scripts and
//!   monologue text, each failure mapped to a user-facing warning
//! - **Voice prompts**: reference audio/transcript pairs for voice cloning
//! - **Providers**: trait-based generation backends, with a remote model-worker
//!   implementation behind the `remote` feature
//!
//! ## Example
//!
//! ```rust
//! use duet_speech::{DialogueScript, ValidationError};
//!
//! let script = DialogueScript::parse("[S1]Hello there.[S2]Hi!").unwrap();
//! assert_eq!(script.len(), 2);
//!
//! let rejected = DialogueScript::parse("no tags at all");
//! assert_eq!(rejected.unwrap_err(), ValidationError::InvalidDialogueText);
//! ```

pub mod error;
pub mod prompt;
mod provider;
pub mod script;
pub mod types;
pub mod wav;

// Provider implementations
pub mod providers;

pub use error::{TTSError, TTSResult, ValidationError, ValidationResult};
pub use prompt::{
    PromptAudio, VoiceMode, VoicePrompt, check_prompt_completeness, validate_voice_clone_prompt,
};
pub use provider::{TTSModelsProvider, TTSProvider, TTSSpeechProvider};
pub use script::{
    DialogueScript, SpeakerTag, Utterance, extract_tagged_utterances, validate_dialogue_script,
    validate_monologue_text, validate_utterance_text,
};
pub use types::{
    AudioData, DialogueRequest, ModelInfo, MonologueRequest, OUTPUT_SAMPLE_RATE, SamplingParams,
    SpeechResponse,
};
pub use wav::encode_wav;

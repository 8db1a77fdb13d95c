use crate::script::SpeakerTag;
use thiserror::Error;

/// Rejection reasons for user input.
///
/// These never abort the process: the request is simply not forwarded to the
/// generation backend and the `Display` text is shown to the user as a notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Voice clone mode without the prompt audio or transcript
    #[error("Please provide prompt audio and text for the speakers.")]
    IncompletePrompt,

    /// Prompt transcript missing its speaker tag, or empty after the tag
    #[error(
        "Invalid speaker {} prompt text, should strictly follow: \"{}xxx\"",
        .0.digit(),
        .0
    )]
    InvalidPromptTag(SpeakerTag),

    /// No utterances, or an utterance with an unsupported tag or empty body
    #[error("Invalid dialogue input text, should strictly follow: \"[S1]xxx[S2]xxx...\"")]
    InvalidDialogueText,

    /// Monologue text empty or whitespace only
    #[error("Monologue text cannot be empty.")]
    EmptyMonologueText,
}

impl ValidationError {
    /// Stable machine-readable identifier of the violated rule
    pub fn rule(&self) -> String {
        match self {
            ValidationError::IncompletePrompt => "incomplete_prompt".to_string(),
            ValidationError::InvalidPromptTag(tag) => {
                format!("invalid_spk{}_prompt_text", tag.digit())
            }
            ValidationError::InvalidDialogueText => "invalid_dialogue_text".to_string(),
            ValidationError::EmptyMonologueText => "empty_monologue_text".to_string(),
        }
    }
}

/// Result of a validation gate
pub type ValidationResult = Result<(), ValidationError>;

/// TTS-related errors
#[derive(Error, Debug)]
pub enum TTSError {
    /// Provider-specific error
    #[error(
        "TTS provider error: {0}\nProvider: {1}\nDetails: This error originated from the TTS provider implementation"
    )]
    ProviderError(String, String),

    /// Audio generation failed
    #[error(
        "Audio generation failed: {0}\nInput: {1} utterance(s)\nSuggestion: Try shorter text or check that the model worker is loaded"
    )]
    GenerationFailed(String, usize),

    /// Backend returned something that is not a playable waveform
    #[error("Invalid response from TTS provider: {0}\nProvider: {1}")]
    InvalidResponse(String, String),

    /// WAV encoding error
    #[error("WAV encoding failed: {0}")]
    WavError(#[from] hound::Error),

    /// Model not found
    #[error(
        "Model not found: '{0}'\nModel path: {1}\nSuggestion: Check --pretrained-dir points at the pretrained model assets"
    )]
    ModelNotFound(String, String),

    /// Other errors
    #[error("TTS error: {0}\nContext: {1}")]
    Other(String, String),
}

/// Result type for TTS operations
pub type TTSResult<T> = Result<T, TTSError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_texts() {
        assert_eq!(
            ValidationError::IncompletePrompt.to_string(),
            "Please provide prompt audio and text for the speakers."
        );
        assert_eq!(
            ValidationError::InvalidPromptTag(SpeakerTag::S1).to_string(),
            "Invalid speaker 1 prompt text, should strictly follow: \"[S1]xxx\""
        );
        assert_eq!(
            ValidationError::InvalidPromptTag(SpeakerTag::S2).to_string(),
            "Invalid speaker 2 prompt text, should strictly follow: \"[S2]xxx\""
        );
        assert_eq!(
            ValidationError::InvalidDialogueText.to_string(),
            "Invalid dialogue input text, should strictly follow: \"[S1]xxx[S2]xxx...\""
        );
        assert_eq!(
            ValidationError::EmptyMonologueText.to_string(),
            "Monologue text cannot be empty."
        );
    }

    #[test]
    fn test_rule_identifiers() {
        assert_eq!(
            ValidationError::InvalidPromptTag(SpeakerTag::S2).rule(),
            "invalid_spk2_prompt_text"
        );
        assert_eq!(ValidationError::IncompletePrompt.rule(), "incomplete_prompt");
    }

    #[test]
    fn test_provider_error_display() {
        let err = TTSError::ProviderError("boom".to_string(), "remote".to_string());
        let text = err.to_string();
        assert!(text.contains("boom"));
        assert!(text.contains("remote"));
    }
}

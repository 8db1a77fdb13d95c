//! Dialogue and monologue request handlers.
//!
//! Each flow is split in two: a pure `prepare_*` gate that turns user input
//! into a validated request, and an async `*_synthesis` handler that runs the
//! gate and, only on success, calls the backend once.

use duet_speech::{
    DialogueRequest, DialogueScript, MonologueRequest, PromptAudio, SamplingParams, SpeakerTag,
    SpeechResponse, TTSProvider, TTSResult, ValidationError, VoiceMode, VoicePrompt,
    check_prompt_completeness, validate_monologue_text, validate_voice_clone_prompt,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Everything the dialogue form submits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogueInput {
    pub target_text: String,
    #[serde(default)]
    pub voice_mode: VoiceMode,
    #[serde(default)]
    pub spk1_prompt_text: String,
    #[serde(default)]
    pub spk1_prompt_audio: Option<PromptAudio>,
    #[serde(default)]
    pub spk2_prompt_text: String,
    #[serde(default)]
    pub spk2_prompt_audio: Option<PromptAudio>,
}

/// Everything the monologue form submits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonologueInput {
    pub text: String,
    #[serde(default)]
    pub voice_mode: VoiceMode,
    #[serde(default)]
    pub prompt_audio: Option<PromptAudio>,
    #[serde(default)]
    pub prompt_text: String,
}

/// Result of a request that reached a decision.
///
/// A rejection is not an error: it carries the warning to show the user and
/// means the backend was never called.
#[derive(Debug, Clone)]
pub enum SynthesisOutcome {
    Generated(SpeechResponse),
    Rejected(ValidationError),
}

impl SynthesisOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, SynthesisOutcome::Generated(_))
    }
}

/// Uploaded-but-empty files count as missing
fn present(audio: Option<PromptAudio>) -> Option<PromptAudio> {
    audio.filter(|audio| !audio.is_empty())
}

/// Validate a dialogue submission.
///
/// In voice clone mode every prompt field of both speakers must be filled
/// before any transcript tag is checked; the dialogue text is checked last.
pub fn prepare_dialogue(input: DialogueInput) -> Result<DialogueRequest, ValidationError> {
    let mode = input.voice_mode;
    let slots = [
        (
            SpeakerTag::S1,
            input.spk1_prompt_text,
            present(input.spk1_prompt_audio),
        ),
        (
            SpeakerTag::S2,
            input.spk2_prompt_text,
            present(input.spk2_prompt_audio),
        ),
    ];

    let prompts = match mode {
        VoiceMode::VoiceClone => {
            if !slots
                .iter()
                .all(|(_, text, audio)| check_prompt_completeness(text, audio.is_some()))
            {
                return Err(ValidationError::IncompletePrompt);
            }

            let mut prompts = Vec::with_capacity(slots.len());
            for (tag, text, audio) in slots {
                validate_voice_clone_prompt(mode, &text, audio.is_some(), Some(tag))?;
                if let Some(audio) = audio {
                    prompts.push(VoicePrompt::new(audio, text));
                }
            }
            Some(prompts)
        }
        VoiceMode::RandomVoice => None,
    };

    let script = DialogueScript::parse(&input.target_text)?;

    Ok(DialogueRequest {
        script,
        prompts,
        sampling: SamplingParams::DIALOGUE,
    })
}

/// Validate a monologue submission.
///
/// The monologue text is checked first; a voice clone prompt needs audio and
/// a non-blank transcript but no speaker tag.
pub fn prepare_monologue(input: MonologueInput) -> Result<MonologueRequest, ValidationError> {
    validate_monologue_text(&input.text)?;

    let prompt = match input.voice_mode {
        VoiceMode::VoiceClone => {
            let audio = present(input.prompt_audio);
            validate_voice_clone_prompt(
                input.voice_mode,
                input.prompt_text.trim(),
                audio.is_some(),
                None,
            )?;
            audio.map(|audio| VoicePrompt::new(audio, input.prompt_text))
        }
        VoiceMode::RandomVoice => None,
    };

    Ok(MonologueRequest {
        text: input.text,
        prompt,
        sampling: SamplingParams::MONOLOGUE,
    })
}

/// Handle a dialogue submission end to end
pub async fn dialogue_synthesis(
    provider: &dyn TTSProvider,
    input: DialogueInput,
) -> TTSResult<SynthesisOutcome> {
    let request = match prepare_dialogue(input) {
        Ok(request) => request,
        Err(rejection) => {
            log::warn!("Dialogue request rejected ({}): {}", rejection.rule(), rejection);
            return Ok(SynthesisOutcome::Rejected(rejection));
        }
    };

    let start = Instant::now();
    log::info!(
        "Generating dialogue: {} utterance(s), {} speaker(s), voice clone: {}",
        request.script.len(),
        request.script.speakers().len(),
        request.prompts.is_some()
    );

    let response = provider.generate_dialogue(request).await?;

    log::info!(
        "Dialogue generated by '{}' in {:.2}s ({} ms of audio)",
        provider.provider_name(),
        start.elapsed().as_secs_f64(),
        response.duration_ms
    );
    Ok(SynthesisOutcome::Generated(response))
}

/// Handle a monologue submission end to end
pub async fn monologue_synthesis(
    provider: &dyn TTSProvider,
    input: MonologueInput,
) -> TTSResult<SynthesisOutcome> {
    let request = match prepare_monologue(input) {
        Ok(request) => request,
        Err(rejection) => {
            log::warn!("Monologue request rejected ({}): {}", rejection.rule(), rejection);
            return Ok(SynthesisOutcome::Rejected(rejection));
        }
    };

    let start = Instant::now();
    log::info!(
        "Generating monologue: {} characters, voice clone: {}",
        request.text.chars().count(),
        request.prompt.is_some()
    );

    let response = provider.generate_monologue(request).await?;

    log::info!(
        "Monologue generated by '{}' in {:.2}s ({} ms of audio)",
        provider.provider_name(),
        start.elapsed().as_secs_f64(),
        response.duration_ms
    );
    Ok(SynthesisOutcome::Generated(response))
}

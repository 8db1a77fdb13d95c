//! Prompt-group visibility, derived from the selected voice mode.

use duet_speech::VoiceMode;
use serde::{Deserialize, Serialize};

/// The two input forms of the demo page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    Dialogue,
    Monologue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptGroupView {
    pub id: String,
    pub audio_label: String,
    pub text_label: String,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    pub form: Form,
    pub voice_mode: VoiceMode,
    pub prompt_groups: Vec<PromptGroupView>,
}

fn group(id: &str, audio_label: &str, text_label: &str, visible: bool) -> PromptGroupView {
    PromptGroupView {
        id: id.to_string(),
        audio_label: audio_label.to_string(),
        text_label: text_label.to_string(),
        visible,
    }
}

pub fn form_view(form: Form, voice_mode: VoiceMode) -> FormView {
    let visible = voice_mode.shows_prompt_fields();
    let prompt_groups = match form {
        Form::Dialogue => vec![
            group(
                "spk1",
                "Speaker 1 Prompt Audio",
                "Speaker 1 Prompt Text",
                visible,
            ),
            group(
                "spk2",
                "Speaker 2 Prompt Audio",
                "Speaker 2 Prompt Text",
                visible,
            ),
        ],
        Form::Monologue => vec![group(
            "prompt",
            "Prompt Audio (for Voice Clone)",
            "Prompt Text (for Voice Clone)",
            visible,
        )],
    };

    FormView {
        form,
        voice_mode,
        prompt_groups,
    }
}

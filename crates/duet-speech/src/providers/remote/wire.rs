//! JSON bodies exchanged with the model worker

use crate::{AudioData, DialogueRequest, ModelInfo, MonologueRequest, OUTPUT_SAMPLE_RATE};
use crate::prompt::PromptAudio;
use serde::{Deserialize, Serialize};

pub(crate) const LOAD_ROUTE: &str = "v1/load";
pub(crate) const DIALOGUE_ROUTE: &str = "v1/dialogue";
pub(crate) const MONOLOGUE_ROUTE: &str = "v1/monologue";

#[derive(Debug, Serialize)]
pub(crate) struct LoadBody<'a> {
    pub pretrained_dir: String,
    pub gen_type: &'a str,
    pub device: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoadReply {
    pub model: ModelInfo,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_sample_rate() -> u32 {
    OUTPUT_SAMPLE_RATE
}

#[derive(Debug, Serialize)]
pub(crate) struct DialogueBody<'a> {
    pub text_list: Vec<String>,
    pub prompt_wav_list: Option<Vec<&'a PromptAudio>>,
    pub prompt_text_list: Option<Vec<&'a str>>,
    pub temperature: f32,
    pub topk: usize,
}

impl<'a> From<&'a DialogueRequest> for DialogueBody<'a> {
    fn from(request: &'a DialogueRequest) -> Self {
        let prompts = request.prompts.as_deref();
        Self {
            text_list: request.script.text_list(),
            prompt_wav_list: prompts.map(|p| p.iter().map(|prompt| &prompt.audio).collect()),
            prompt_text_list: prompts.map(|p| p.iter().map(|prompt| prompt.text.as_str()).collect()),
            temperature: request.sampling.temperature,
            topk: request.sampling.top_k,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MonologueBody<'a> {
    pub text: &'a str,
    pub prompt_wav: Option<&'a PromptAudio>,
    pub prompt_text: Option<&'a str>,
    pub temperature: f32,
    pub topk: usize,
}

impl<'a> From<&'a MonologueRequest> for MonologueBody<'a> {
    fn from(request: &'a MonologueRequest) -> Self {
        Self {
            text: &request.text,
            prompt_wav: request.prompt.as_ref().map(|prompt| &prompt.audio),
            prompt_text: request.prompt.as_ref().map(|prompt| prompt.text.as_str()),
            temperature: request.sampling.temperature,
            topk: request.sampling.top_k,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateReply {
    pub audio: AudioData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DialogueScript, SamplingParams, VoicePrompt};

    #[test]
    fn test_dialogue_body_random_voice() {
        let request = DialogueRequest {
            script: DialogueScript::parse("[S1]a[S2]b").unwrap(),
            prompts: None,
            sampling: SamplingParams::DIALOGUE,
        };
        let json = serde_json::to_value(DialogueBody::from(&request)).unwrap();
        assert_eq!(json["text_list"], serde_json::json!(["[S1]a", "[S2]b"]));
        assert!(json["prompt_wav_list"].is_null());
        assert!(json["prompt_text_list"].is_null());
        assert_eq!(json["topk"], 30);
    }

    #[test]
    fn test_monologue_body_with_prompt() {
        let request = MonologueRequest {
            text: "Hello".to_string(),
            prompt: Some(VoicePrompt::new(
                PromptAudio::new(Some("p.wav".to_string()), vec![0, 1]),
                "reference",
            )),
            sampling: SamplingParams::MONOLOGUE,
        };
        let json = serde_json::to_value(MonologueBody::from(&request)).unwrap();
        assert_eq!(json["text"], "Hello");
        assert_eq!(json["prompt_text"], "reference");
        assert_eq!(json["prompt_wav"]["file_name"], "p.wav");
        assert_eq!(json["topk"], 20);
    }
}

//! Speaker tag grammar and text validation.
//!
//! A tag is the literal `[S` + one ASCII digit + `]`. Extraction accepts any
//! digit, while a dialogue script only accepts speakers 1 to 4; utterances
//! with other digits are rejected by [`validate_dialogue_script`], never by
//! [`extract_tagged_utterances`].

use crate::error::{ValidationError, ValidationResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opening tag followed by any run of characters without square brackets.
static TAGGED_UTTERANCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[S([0-9])\][^\[\]]*").expect("tagged utterance pattern is valid")
});

/// Length in bytes of a `[Sn]` tag.
const TAG_LEN: usize = 4;

/// Speaker identifier carried by a `[Sn]` tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakerTag(u8);

impl SpeakerTag {
    pub const S1: SpeakerTag = SpeakerTag(1);
    pub const S2: SpeakerTag = SpeakerTag(2);
    pub const S3: SpeakerTag = SpeakerTag(3);
    pub const S4: SpeakerTag = SpeakerTag(4);

    /// Speakers a dialogue script may use
    pub const SUPPORTED: [SpeakerTag; 4] = [Self::S1, Self::S2, Self::S3, Self::S4];

    /// Create a tag from a single decimal digit
    pub fn new(digit: u8) -> Option<Self> {
        (digit <= 9).then_some(Self(digit))
    }

    /// Parse a tag from the start of `text`, e.g. `"[S2]hello"`
    pub fn parse_prefix(text: &str) -> Option<Self> {
        match text.as_bytes() {
            [b'[', b'S', d @ b'0'..=b'9', b']', ..] => Some(Self(d - b'0')),
            _ => None,
        }
    }

    pub fn digit(&self) -> u8 {
        self.0
    }

    /// The literal tag string, e.g. `"[S1]"`
    pub fn literal(&self) -> String {
        format!("[S{}]", self.0)
    }

    pub fn is_supported(&self) -> bool {
        (1..=4).contains(&self.0)
    }
}

impl fmt::Display for SpeakerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[S{}]", self.0)
    }
}

/// One extracted, tagged span of a dialogue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Speaker tag found at the start of the span
    pub tag: SpeakerTag,
    /// Trimmed span, tag included, as forwarded to the backend
    pub text: String,
}

impl Utterance {
    /// Build an utterance from already-tagged text, if it starts with a tag
    pub fn from_tagged(text: &str) -> Option<Self> {
        let text = text.trim();
        SpeakerTag::parse_prefix(text).map(|tag| Self {
            tag,
            text: text.to_string(),
        })
    }

    /// Text after the tag, trimmed
    pub fn body(&self) -> &str {
        self.text.get(TAG_LEN..).unwrap_or_default().trim()
    }

    /// Re-run the single-utterance check against this utterance's own tag
    pub fn is_valid(&self) -> bool {
        self.tag.is_supported() && validate_utterance_text(&self.text, Some(self.tag))
    }
}

/// Check that `text`, once trimmed, starts with `required_tag` (when given)
/// and still has content after the tag is removed.
pub fn validate_utterance_text(text: &str, required_tag: Option<SpeakerTag>) -> bool {
    let mut text = text.trim();

    if let Some(tag) = required_tag {
        match text.strip_prefix(tag.literal().as_str()) {
            Some(rest) => text = rest,
            None => return false,
        }
    }

    !text.trim().is_empty()
}

/// Extract every `[Sn]...` span of `text`, in input order.
///
/// A span ends at the next square bracket of any kind, so stray brackets cut
/// the current body short and the text after them is skipped until the next
/// well-formed tag.
pub fn extract_tagged_utterances(text: &str) -> Vec<Utterance> {
    TAGGED_UTTERANCE
        .captures_iter(text)
        .filter_map(|caps| {
            let span = caps.get(0)?.as_str().trim();
            let digit = caps.get(1)?.as_str().as_bytes().first()? - b'0';
            Some(Utterance {
                tag: SpeakerTag::new(digit)?,
                text: span.to_string(),
            })
        })
        .collect()
}

/// A script is valid when it is non-empty and every utterance uses a
/// supported speaker and has a non-empty body.
pub fn validate_dialogue_script(utterances: &[Utterance]) -> bool {
    if utterances.is_empty() {
        return false;
    }

    utterances.iter().all(Utterance::is_valid)
}

/// Monologue text only needs to be non-blank
pub fn validate_monologue_text(text: &str) -> ValidationResult {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyMonologueText);
    }
    Ok(())
}

/// An ordered, validated sequence of utterances
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScript")]
pub struct DialogueScript {
    utterances: Vec<Utterance>,
}

/// Unchecked wire form; deserialization goes through [`DialogueScript::from_utterances`]
#[derive(Deserialize)]
struct RawScript {
    utterances: Vec<Utterance>,
}

impl TryFrom<RawScript> for DialogueScript {
    type Error = ValidationError;

    fn try_from(raw: RawScript) -> Result<Self, Self::Error> {
        Self::from_utterances(raw.utterances)
    }
}

impl DialogueScript {
    /// Extract and validate a dialogue from free text
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let utterances = extract_tagged_utterances(text);
        Self::from_utterances(utterances)
    }

    pub fn from_utterances(utterances: Vec<Utterance>) -> Result<Self, ValidationError> {
        if !validate_dialogue_script(&utterances) {
            return Err(ValidationError::InvalidDialogueText);
        }
        Ok(Self { utterances })
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    /// Utterance texts in generation order, tags included
    pub fn text_list(&self) -> Vec<String> {
        self.utterances.iter().map(|u| u.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    /// Distinct speakers in order of first appearance
    pub fn speakers(&self) -> Vec<SpeakerTag> {
        let mut speakers = Vec::new();
        for utterance in &self.utterances {
            if !speakers.contains(&utterance.tag) {
                speakers.push(utterance.tag);
            }
        }
        speakers
    }
}

impl IntoIterator for DialogueScript {
    type Item = Utterance;
    type IntoIter = std::vec::IntoIter<Utterance>;

    fn into_iter(self) -> Self::IntoIter {
        self.utterances.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(text: &str) -> Utterance {
        Utterance::from_tagged(text).unwrap()
    }

    #[test]
    fn test_validate_utterance_with_tag() {
        assert!(validate_utterance_text("[S1]hi", Some(SpeakerTag::S1)));
        assert!(validate_utterance_text("  [S1]  hi  ", Some(SpeakerTag::S1)));
        assert!(!validate_utterance_text("[S1]   ", Some(SpeakerTag::S1)));
        assert!(!validate_utterance_text("[S2]hi", Some(SpeakerTag::S1)));
        assert!(!validate_utterance_text("text without tag", Some(SpeakerTag::S1)));
        assert!(!validate_utterance_text("hi [S1]", Some(SpeakerTag::S1)));
    }

    #[test]
    fn test_validate_utterance_without_tag() {
        assert!(validate_utterance_text("plain text", None));
        assert!(validate_utterance_text("[S1]", None));
        assert!(!validate_utterance_text("   ", None));
        assert!(!validate_utterance_text("", None));
    }

    #[test]
    fn test_extract_two_speakers() {
        let utterances = extract_tagged_utterances("[S1]Hello[S2]World");
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].tag, SpeakerTag::S1);
        assert_eq!(utterances[0].body(), "Hello");
        assert_eq!(utterances[1].tag, SpeakerTag::S2);
        assert_eq!(utterances[1].body(), "World");
    }

    #[test]
    fn test_extract_trims_spans() {
        let utterances = extract_tagged_utterances("  [S1]  Good morning.  \n[S2] Morning!\n");
        assert_eq!(utterances[0].text, "[S1]  Good morning.");
        assert_eq!(utterances[0].body(), "Good morning.");
        assert_eq!(utterances[1].text, "[S2] Morning!");
    }

    #[test]
    fn test_extract_without_tags_is_empty() {
        for text in ["", "hello world", "[S]x", "[s1]lower", "[SA]x", "[S12]x", "S1] nope"] {
            assert!(
                extract_tagged_utterances(text).is_empty(),
                "expected no utterances for {text:?}"
            );
        }
    }

    #[test]
    fn test_extract_accepts_any_digit() {
        let utterances = extract_tagged_utterances("[S0]zero[S9]nine");
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].tag.digit(), 0);
        assert_eq!(utterances[1].tag.digit(), 9);
    }

    #[test]
    fn test_stray_bracket_ends_body() {
        let utterances = extract_tagged_utterances("[S1]see [note] here[S2]ok");
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].text, "[S1]see");
        assert_eq!(utterances[1].text, "[S2]ok");
    }

    #[test]
    fn test_empty_body_is_kept_by_extraction() {
        let utterances = extract_tagged_utterances("[S1][S2]text");
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].body(), "");
        assert!(!validate_dialogue_script(&utterances));
    }

    #[test]
    fn test_validate_dialogue_script() {
        assert!(!validate_dialogue_script(&[]));

        let mut script = vec![
            utterance("[S1]one"),
            utterance("[S2]two"),
            utterance("[S3]three"),
            utterance("[S4]four"),
        ];
        assert!(validate_dialogue_script(&script));

        script.push(utterance("[S5]five"));
        assert!(!validate_dialogue_script(&script));
    }

    #[test]
    fn test_dialogue_script_checks_each_utterance_tag() {
        let mismatched = Utterance {
            tag: SpeakerTag::new(5).unwrap(),
            text: "[S1]x".to_string(),
        };
        assert!(!mismatched.is_valid());
        assert!(!validate_dialogue_script(&[mismatched.clone()]));
        assert_eq!(
            DialogueScript::from_utterances(vec![utterance("[S1]a"), mismatched]),
            Err(ValidationError::InvalidDialogueText)
        );

        let relabelled = Utterance {
            tag: SpeakerTag::S2,
            text: "[S1]x".to_string(),
        };
        assert!(!validate_dialogue_script(&[relabelled]));
    }

    #[test]
    fn test_dialogue_script_deserialization_is_validated() {
        assert!(serde_json::from_str::<DialogueScript>(r#"{"utterances":[]}"#).is_err());

        let unsupported = r#"{"utterances":[{"tag":5,"text":"[S5]x"}]}"#;
        assert!(serde_json::from_str::<DialogueScript>(unsupported).is_err());

        let script = DialogueScript::parse("[S1]Hi[S2]Hello").unwrap();
        let json = serde_json::to_string(&script).unwrap();
        let decoded: DialogueScript = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, script);
    }

    #[test]
    fn test_utterance_is_valid() {
        assert!(utterance("[S3]hey").is_valid());
        assert!(!utterance("[S0]hey").is_valid());
        assert!(!utterance("[S1]  ").is_valid());
    }

    #[test]
    fn test_dialogue_script_parse() {
        let script = DialogueScript::parse("[S1]Hi.[S2]Hello.[S1]Bye.").unwrap();
        assert_eq!(script.len(), 3);
        assert_eq!(script.text_list(), vec!["[S1]Hi.", "[S2]Hello.", "[S1]Bye."]);
        assert_eq!(script.speakers(), vec![SpeakerTag::S1, SpeakerTag::S2]);

        assert_eq!(
            DialogueScript::parse("just words"),
            Err(ValidationError::InvalidDialogueText)
        );
        assert_eq!(
            DialogueScript::parse("[S1]fine[S7]unsupported"),
            Err(ValidationError::InvalidDialogueText)
        );
    }

    #[test]
    fn test_validate_monologue_text() {
        assert_eq!(
            validate_monologue_text("   "),
            Err(ValidationError::EmptyMonologueText)
        );
        assert!(validate_monologue_text("Hello there").is_ok());
    }

    #[test]
    fn test_validation_is_repeatable() {
        let text = "[S1]a[S2]b[S9]c";
        let first = extract_tagged_utterances(text);
        for _ in 0..3 {
            let again = extract_tagged_utterances(text);
            assert_eq!(first, again);
            assert_eq!(
                validate_dialogue_script(&first),
                validate_dialogue_script(&again)
            );
        }
    }

    #[test]
    fn test_speaker_tag_parsing() {
        assert_eq!(SpeakerTag::parse_prefix("[S2]x"), Some(SpeakerTag::S2));
        assert_eq!(SpeakerTag::parse_prefix("[S2"), None);
        assert_eq!(SpeakerTag::new(10), None);
        assert_eq!(SpeakerTag::S4.literal(), "[S4]");
        assert_eq!(SpeakerTag::S3.to_string(), "[S3]");
        assert!(!SpeakerTag::new(0).unwrap().is_supported());
    }
}

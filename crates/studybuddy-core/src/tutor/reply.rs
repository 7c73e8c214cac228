//! Turning raw model text into task-specific replies.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::task::{Direction, TutorTask};

static TRANSLATION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"TRANSLATION:\s*(.*)").expect("translation pattern is valid"));
static PRONUNCIATION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"PRONUNCIATION:\s*(.*)").expect("pronunciation pattern is valid"));

const SUCCESS_MARKER: &str = "SUCCESS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationGuide {
    pub translation: String,
    /// Pronunciation in Bengali script; empty when the model omitted it.
    pub pronunciation: String,
}

impl TranslationGuide {
    /// Text handed to speech synthesis: always the English side.
    pub fn speakable<'a>(&'a self, direction: Direction, input: &'a str) -> &'a str {
        match direction {
            Direction::BengaliToEnglish => &self.translation,
            Direction::EnglishToBengali => input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TutorReply {
    Text(String),
    Translation(TranslationGuide),
    /// Daily goal verdict. `feedback` carries the correction when rejected.
    GoalVerdict { accepted: bool, feedback: String },
}

impl TutorReply {
    pub fn parse(task: &TutorTask, raw: &str) -> Self {
        match task {
            TutorTask::Translate { .. } => match parse_translation(raw) {
                Some(guide) => TutorReply::Translation(guide),
                None => TutorReply::Text(raw.trim().to_string()),
            },
            TutorTask::GoalCheck { .. } => TutorReply::GoalVerdict {
                accepted: is_success(raw),
                feedback: raw.trim().to_string(),
            },
            _ => TutorReply::Text(raw.trim().to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            TutorReply::Text(text) => text,
            TutorReply::Translation(guide) => &guide.translation,
            TutorReply::GoalVerdict { feedback, .. } => feedback,
        }
    }
}

/// `None` when no `TRANSLATION:` line is present.
pub fn parse_translation(raw: &str) -> Option<TranslationGuide> {
    let translation = TRANSLATION_LINE.captures(raw)?.get(1)?.as_str().trim();
    let pronunciation = PRONUNCIATION_LINE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or_default();
    Some(TranslationGuide {
        translation: translation.to_string(),
        pronunciation: pronunciation.to_string(),
    })
}

pub fn is_success(raw: &str) -> bool {
    raw.to_uppercase().contains(SUCCESS_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translation_lines() {
        let raw = "TRANSLATION: I eat rice.\nPRONUNCIATION: আই ইট রাইস।\n";
        let guide = parse_translation(raw).unwrap();
        assert_eq!(guide.translation, "I eat rice.");
        assert_eq!(guide.pronunciation, "আই ইট রাইস।");
    }

    #[test]
    fn test_translation_without_pronunciation() {
        let guide = parse_translation("Sure!\nTRANSLATION: আমি ভাত খাই").unwrap();
        assert_eq!(guide.translation, "আমি ভাত খাই");
        assert!(guide.pronunciation.is_empty());
        assert!(parse_translation("no markers here").is_none());
    }

    #[test]
    fn test_unstructured_translation_falls_back_to_text() {
        let task = TutorTask::Translate {
            text: "hello".into(),
            direction: Direction::EnglishToBengali,
        };
        assert_eq!(
            TutorReply::parse(&task, "  হ্যালো  "),
            TutorReply::Text("হ্যালো".into())
        );
    }

    #[test]
    fn test_goal_verdict() {
        let task = TutorTask::GoalCheck {
            sentence: "I go school".into(),
        };
        assert_eq!(
            TutorReply::parse(&task, "Success!"),
            TutorReply::GoalVerdict {
                accepted: true,
                feedback: "Success!".into()
            }
        );
        let rejected = TutorReply::parse(&task, "ভুল: I go to school হবে।");
        assert!(matches!(rejected, TutorReply::GoalVerdict { accepted: false, .. }));
    }

    #[test]
    fn test_speakable_side() {
        let guide = TranslationGuide {
            translation: "I eat rice".into(),
            pronunciation: String::new(),
        };
        assert_eq!(guide.speakable(Direction::BengaliToEnglish, "আমি ভাত খাই"), "I eat rice");
        assert_eq!(guide.speakable(Direction::EnglishToBengali, "Good morning"), "Good morning");
    }
}

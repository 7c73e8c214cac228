//! Configuration model (`config.toml`).

use serde::{Deserialize, Serialize};

use crate::goal::{DEFAULT_CEILING, DailyGoal, RewardPolicy};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_VOICE: &str = "Kore";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub goal: GoalSettings,
    #[serde(default)]
    pub admin: AdminSettings,
    #[serde(default)]
    pub gemini: GeminiSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GoalSettings {
    #[serde(default = "default_ceiling")]
    pub ceiling: u32,
    #[serde(default)]
    pub reward: RewardPolicy,
}

fn default_ceiling() -> u32 {
    DEFAULT_CEILING
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            reward: RewardPolicy::default(),
        }
    }
}

impl GoalSettings {
    pub fn daily_goal(&self) -> DailyGoal {
        DailyGoal::new(self.ceiling.max(1), self.reward)
    }
}

/// Admin gate credentials.
///
/// This is a UI gate checked on the client, not a security boundary.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AdminSettings {
    /// Accepted login identifiers (email, phone).
    #[serde(default = "default_admin_identifiers")]
    pub identifiers: Vec<String>,
    #[serde(default = "default_admin_secret")]
    pub secret: String,
}

fn default_admin_identifiers() -> Vec<String> {
    vec!["admin@studybuddy.local".to_string()]
}

fn default_admin_secret() -> String {
    "change-me".to_string()
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            identifiers: default_admin_identifiers(),
            secret: default_admin_secret(),
        }
    }
}

impl AdminSettings {
    pub fn accepts(&self, identifier: &str, secret: &str) -> bool {
        let identifier = identifier.trim();
        self.identifiers.iter().any(|id| id == identifier) && self.secret == secret
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GeminiSettings {
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.to_string()
}

fn default_speech_model() -> String {
    DEFAULT_SPEECH_MODEL.to_string()
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            text_model: default_text_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// API keys, kept in `secret.json` next to the config.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiSecret>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GeminiSecret {
    pub api_key: String,
}

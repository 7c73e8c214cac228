use async_trait::async_trait;

use super::request::TutorRequest;
use super::speech::SpeechClip;
use crate::error::Result;

/// Remote model that answers tutor requests.
#[async_trait]
pub trait TutorAgent: Send + Sync {
    /// Returns the model's text. An empty string means no answer.
    async fn generate(&self, request: TutorRequest) -> Result<String>;

    async fn synthesize_speech(&self, text: &str) -> Result<SpeechClip>;
}

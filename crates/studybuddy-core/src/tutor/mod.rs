//! Tutor features backed by a remote model.

mod agent;
mod outcome;
mod reply;
mod request;
mod speech;
mod task;

pub use agent::TutorAgent;
pub use outcome::{EMPTY_REPLY_FALLBACK, FAILURE_FALLBACK, TaskOutcome};
pub use reply::{TranslationGuide, TutorReply, is_success, parse_translation};
pub use request::{ChatRole, ChatTurn, ImageInput, RequestPart, TutorRequest};
pub use speech::{SPEECH_SAMPLE_RATE, SpeechClip};
pub use task::{Direction, GREETING, Language, TutorTask, speech_prompt};

//! Remote model integrations for StudyBuddy tutor features.

pub mod gemini_api_agent;
pub mod image;

pub use gemini_api_agent::GeminiApiAgent;
pub use image::load_image;

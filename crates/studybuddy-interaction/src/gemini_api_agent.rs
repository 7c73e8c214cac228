//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Text requests go to the configured text model; speech synthesis goes to
//! the speech model with an audio response modality. The API key comes from
//! `GEMINI_API_KEY` or `secret.json`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use studybuddy_core::config::GeminiSettings;
use studybuddy_core::error::{Result, StudyBuddyError};
use studybuddy_core::tutor::{
    ChatRole, RequestPart, SpeechClip, TutorAgent, TutorRequest, speech_prompt,
};
use studybuddy_infrastructure::SecretService;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    settings: GeminiSettings,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates an agent with a client-side request timeout from `settings`.
    pub fn new(api_key: impl Into<String>, settings: GeminiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()
            .map_err(|e| StudyBuddyError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            settings,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Resolves the API key via `SecretService`.
    pub fn from_secrets(base_path: Option<&Path>, settings: GeminiSettings) -> Result<Self> {
        let api_key = SecretService::new(base_path)?.gemini_api_key()?;
        Self::new(api_key, settings)
    }

    /// Points the agent at another endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            api_key = self.api_key
        );

        tracing::debug!(model, "sending Gemini request");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let kind = if err.is_timeout() { "timed out" } else { "failed" };
                StudyBuddyError::remote(format!("Gemini API request {kind}: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        response
            .json()
            .await
            .map_err(|err| StudyBuddyError::remote(format!("Failed to parse Gemini response: {err}")))
    }
}

#[async_trait]
impl TutorAgent for GeminiApiAgent {
    async fn generate(&self, request: TutorRequest) -> Result<String> {
        let body = GenerateContentRequest::from_tutor_request(request);
        let response = self.send_request(&self.settings.text_model, &body).await?;
        Ok(extract_text_response(response))
    }

    async fn synthesize_speech(&self, text: &str) -> Result<SpeechClip> {
        let body = GenerateContentRequest::speech(speech_prompt(text), &self.settings.voice);
        let response = self.send_request(&self.settings.speech_model, &body).await?;
        let audio = extract_audio_response(response).ok_or_else(|| {
            StudyBuddyError::remote("Gemini API returned no audio in the response candidates")
        })?;
        SpeechClip::from_base64_pcm(&audio)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// History turns first, then the new user turn.
    fn from_tutor_request(request: TutorRequest) -> Self {
        let mut contents: Vec<Content> = request
            .history
            .into_iter()
            .map(|turn| Content {
                role: match turn.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                }
                .to_string(),
                parts: vec![Part::Text { text: turn.text }],
            })
            .collect();

        let parts = request
            .parts
            .into_iter()
            .map(|part| match part {
                RequestPart::Text(text) => Part::Text { text },
                RequestPart::Image(image) => Part::InlineData {
                    inline_data: InlineDataPayload {
                        mime_type: image.mime_type,
                        data: image.data,
                    },
                },
            })
            .collect();
        contents.push(Content {
            role: "user".to_string(),
            parts,
        });

        let system_instruction = request.system_instruction.map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part::Text { text }],
        });

        Self {
            contents,
            system_instruction,
            generation_config: None,
        }
    }

    fn speech(prompt: String, voice: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::Text { text: prompt }],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.to_string(),
                        },
                    },
                },
            }),
        }
    }
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    speech_config: SpeechConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineDataPayload>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn first_candidate_parts(response: GenerateContentResponse) -> Vec<PartResponse> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
}

/// Concatenated text of the first candidate; empty when there is none.
fn extract_text_response(response: GenerateContentResponse) -> String {
    first_candidate_parts(response)
        .into_iter()
        .filter_map(|part| part.text)
        .collect()
}

fn extract_audio_response(response: GenerateContentResponse) -> Option<String> {
    first_candidate_parts(response)
        .into_iter()
        .find_map(|part| part.inline_data)
        .map(|inline| inline.data)
}

fn map_http_error(
    status: StatusCode,
    body: String,
    retry_after: Option<Duration>,
) -> StudyBuddyError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let retry_hint = retry_after
        .map(|delay| format!(" (retry after {}s)", delay.as_secs()))
        .unwrap_or_default();

    StudyBuddyError::remote(format!(
        "Gemini API error {}: {message}{retry_hint}",
        status.as_u16()
    ))
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

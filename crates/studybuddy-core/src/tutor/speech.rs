use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyBuddyError};

/// Sample rate of the speech model's PCM output.
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

/// Mono 16-bit PCM audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechClip {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl SpeechClip {
    /// Decodes base64 little-endian 16-bit PCM at 24 kHz.
    pub fn from_base64_pcm(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| StudyBuddyError::Serialization {
                format: "base64".to_string(),
                message: e.to_string(),
            })?;
        if bytes.len() % 2 != 0 {
            return Err(StudyBuddyError::Serialization {
                format: "pcm".to_string(),
                message: format!("odd byte length {}", bytes.len()),
            });
        }
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self {
            sample_rate: SPEECH_SAMPLE_RATE,
            samples,
        })
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Samples normalized to `[-1.0, 1.0)`.
    pub fn normalized(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(|s| *s as f32 / 32768.0)
    }

    /// Raw little-endian PCM bytes.
    pub fn to_pcm_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }
}

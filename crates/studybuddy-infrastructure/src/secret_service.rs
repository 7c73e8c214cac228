//! Secret service implementation.
//!
//! API keys live in `secret.json`; `GEMINI_API_KEY` takes precedence.

use std::path::{Path, PathBuf};
use studybuddy_core::config::{GeminiSecret, SecretConfig};
use studybuddy_core::error::{Result, StudyBuddyError};

use crate::paths::{ServiceType, StudyBuddyPaths};
use crate::storage::AtomicJsonFile;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone)]
pub struct SecretService {
    storage: AtomicJsonFile<SecretConfig>,
}

impl SecretService {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = StudyBuddyPaths::new(base_path).get_path(ServiceType::Secret)?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            storage: AtomicJsonFile::new(path),
        }
    }

    pub fn load_secrets(&self) -> Result<SecretConfig> {
        Ok(self.storage.load()?.unwrap_or_default())
    }

    /// Resolves the Gemini API key from the environment, then the file.
    pub fn gemini_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(GEMINI_API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key.trim().to_string());
            }
        }
        self.file_api_key()?.ok_or_else(|| {
            StudyBuddyError::config(format!(
                "Gemini API key not found. Set {} or add it to '{}'",
                GEMINI_API_KEY_ENV,
                self.storage.path().display()
            ))
        })
    }

    fn file_api_key(&self) -> Result<Option<String>> {
        Ok(self
            .load_secrets()?
            .gemini
            .map(|gemini| gemini.api_key)
            .filter(|key| !key.trim().is_empty()))
    }

    pub fn set_gemini_api_key(&self, api_key: &str) -> Result<()> {
        self.storage.update(SecretConfig::default(), |secrets| {
            secrets.gemini = Some(GeminiSecret {
                api_key: api_key.trim().to_string(),
            });
            Ok::<(), StudyBuddyError>(())
        })?;
        restrict_permissions(self.storage.path())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

//! Path management for StudyBuddy files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/studybuddy/        # Config directory (AppPaths default)
//! ├── config.toml              # Application configuration
//! └── secret.json              # API keys
//!
//! ~/.local/share/studybuddy/   # Data directory
//! ├── users.json               # Profile store
//! ├── app_state.json           # Remembered session and admin gate
//! └── content.json             # Notices, links, help line, banner
//! ```
//!
//! `STUDYBUDDY_HOME` (or an explicit base path) puts every file in one
//! directory instead.

use std::path::{Path, PathBuf};
use studybuddy_core::error::StudyBuddyError;
use version_migrate::AppPaths;

pub const HOME_ENV: &str = "STUDYBUDDY_HOME";

/// Files managed by the infrastructure services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Secret,
    Profiles,
    AppState,
    Content,
}

impl ServiceType {
    pub fn file_name(self) -> &'static str {
        match self {
            ServiceType::Config => "config.toml",
            ServiceType::Secret => "secret.json",
            ServiceType::Profiles => "users.json",
            ServiceType::AppState => "app_state.json",
            ServiceType::Content => "content.json",
        }
    }

    fn is_config(self) -> bool {
        matches!(self, ServiceType::Config | ServiceType::Secret)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudyBuddyPaths {
    base: Option<PathBuf>,
}

impl StudyBuddyPaths {
    /// `base` wins over `STUDYBUDDY_HOME`, which wins over platform paths.
    pub fn new(base: Option<&Path>) -> Self {
        let base = base
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(HOME_ENV).map(PathBuf::from));
        Self { base }
    }

    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, StudyBuddyError> {
        let dir = match &self.base {
            Some(base) => base.clone(),
            None => {
                let app_paths = AppPaths::new("studybuddy");
                let resolved = if service.is_config() {
                    app_paths.config_dir()
                } else {
                    app_paths.data_dir()
                };
                resolved.map_err(|e| {
                    StudyBuddyError::config(format!("Cannot resolve StudyBuddy directory: {}", e))
                })?
            }
        };
        Ok(dir.join(service.file_name()))
    }
}

//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and caches it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use studybuddy_core::config::RootConfig;
use studybuddy_core::error::{Result, StudyBuddyError};

use crate::paths::{ServiceType, StudyBuddyPaths};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration; `None` until first access.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = StudyBuddyPaths::new(base_path).get_path(ServiceType::Config)?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing file yields defaults. A malformed file is logged and
    /// also yields defaults.
    pub fn get_config(&self) -> RootConfig {
        if let Ok(cached) = self.config.read() {
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "invalid config, using defaults");
                RootConfig::default()
            }
        };

        if let Ok(mut cache) = self.config.write() {
            *cache = Some(loaded.clone());
        }
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cache) = self.config.write() {
            *cache = None;
        }
    }

    pub fn load_config(&self) -> Result<RootConfig> {
        if !self.path.exists() {
            return Ok(RootConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Writes a default `config.toml` when none exists. Returns its path.
    pub fn ensure_config_file(&self) -> Result<PathBuf> {
        if self.path.exists() {
            return Ok(self.path.clone());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let template = toml::to_string_pretty(&RootConfig::default())?;
        std::fs::write(&self.path, template).map_err(|e| {
            StudyBuddyError::io(format!("Failed to write '{}': {}", self.path.display(), e))
        })?;
        tracing::info!(path = %self.path.display(), "created default config");
        Ok(self.path.clone())
    }
}

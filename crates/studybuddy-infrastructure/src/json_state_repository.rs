//! Application state repository implementation.
//!
//! Persists client-level state (remembered learner, admin gate) to
//! `app_state.json` and caches it in memory.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use studybuddy_core::error::{Result, StudyBuddyError};
use studybuddy_core::state::{AppState, StateRepository};

use crate::dto::create_app_state_migrator;
use crate::paths::{ServiceType, StudyBuddyPaths};
use crate::storage::AtomicJsonFile;

const ENTITY: &str = "app_state";

#[derive(Clone)]
pub struct JsonStateRepository {
    /// Cached app state loaded from storage.
    state: Arc<Mutex<AppState>>,
    storage: AtomicJsonFile<serde_json::Value>,
}

impl JsonStateRepository {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = StudyBuddyPaths::new(base_path).get_path(ServiceType::AppState)?;
        Ok(Self::with_path(path))
    }

    /// Loads the initial state; a missing or unreadable file yields defaults.
    pub fn with_path(path: PathBuf) -> Self {
        let storage = AtomicJsonFile::new(path);
        let initial_state = read_state(&storage).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "app state unreadable, using defaults");
            AppState::default()
        });
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            storage,
        }
    }

    /// Re-reads the file, picking up writes from other processes.
    pub fn reload(&self) -> Result<AppState> {
        let state = read_state(&self.storage)?;
        *self.lock()? = state.clone();
        Ok(state)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, AppState>> {
        self.state
            .lock()
            .map_err(|e| StudyBuddyError::internal(format!("app state lock poisoned: {}", e)))
    }
}

fn read_state(storage: &AtomicJsonFile<serde_json::Value>) -> Result<AppState> {
    let Some(value) = storage.load()? else {
        return Ok(AppState::default());
    };
    let migrator = create_app_state_migrator();
    Ok(migrator.load_flat_from(ENTITY, value)?)
}

impl StateRepository for JsonStateRepository {
    fn get_state(&self) -> AppState {
        match self.lock() {
            Ok(state) => state.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default app state");
                AppState::default()
            }
        }
    }

    fn save_state(&self, state: AppState) -> Result<()> {
        let migrator = create_app_state_migrator();
        let json = migrator.save_domain_flat(ENTITY, &state)?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        self.storage.save(&value)?;

        *self.lock()? = state;
        Ok(())
    }
}

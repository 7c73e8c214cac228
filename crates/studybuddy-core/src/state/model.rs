//! Application state domain model.
//!
//! Client-level state that survives restarts: who was signed in and whether
//! the admin gate was open.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Identifier of the remembered active learner.
    #[serde(default)]
    pub active_user_id: Option<String>,

    /// Whether the admin gate is open.
    #[serde(default)]
    pub admin_unlocked: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let state = AppState::default();
        assert!(state.active_user_id.is_none());
        assert!(!state.admin_unlocked);
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let state: AppState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, AppState::new());
    }
}

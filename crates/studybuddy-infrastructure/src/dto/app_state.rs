//! AppState DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use studybuddy_core::state::AppState;

/// AppState V1.0.0: remembered session only.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct AppStateV1_0_0 {
    #[serde(default)]
    pub active_user_id: Option<String>,
}

/// AppState V1.1.0: added the persisted admin gate.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct AppStateV1_1_0 {
    #[serde(default)]
    pub active_user_id: Option<String>,
    #[serde(default)]
    pub admin_unlocked: bool,
}

impl MigratesTo<AppStateV1_1_0> for AppStateV1_0_0 {
    fn migrate(self) -> AppStateV1_1_0 {
        AppStateV1_1_0 {
            active_user_id: self.active_user_id,
            admin_unlocked: false,
        }
    }
}

impl IntoDomain<AppState> for AppStateV1_1_0 {
    fn into_domain(self) -> AppState {
        AppState {
            active_user_id: self.active_user_id,
            admin_unlocked: self.admin_unlocked,
        }
    }
}

impl FromDomain<AppState> for AppStateV1_1_0 {
    fn from_domain(state: AppState) -> Self {
        AppStateV1_1_0 {
            active_user_id: state.active_user_id,
            admin_unlocked: state.admin_unlocked,
        }
    }
}

/// Creates and configures a Migrator instance for AppState entities.
///
/// - V1.0.0 → V1.1.0: Adds `admin_unlocked` (closed)
/// - V1.1.0 → AppState
pub fn create_app_state_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let app_state_path = version_migrate::Migrator::define("app_state")
        .from::<AppStateV1_0_0>()
        .step::<AppStateV1_1_0>()
        .into_with_save::<AppState>();

    migrator
        .register(app_state_path)
        .expect("Failed to register app_state migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_0_0_keeps_session_and_closes_gate() {
        let migrator = create_app_state_migrator();
        let value = serde_json::json!({ "version": "1.0.0", "active_user_id": "u-1" });

        let state: AppState = migrator.load_flat_from("app_state", value).unwrap();
        assert_eq!(state.active_user_id.as_deref(), Some("u-1"));
        assert!(!state.admin_unlocked);
    }

    #[test]
    fn test_save_writes_current_version() {
        let migrator = create_app_state_migrator();
        let state = AppState {
            active_user_id: None,
            admin_unlocked: true,
        };
        let json = migrator.save_domain_flat("app_state", &state).unwrap();
        assert!(json.contains("\"version\":\"1.1.0\""));
        assert!(json.contains("\"admin_unlocked\":true"));
    }
}

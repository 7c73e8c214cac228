//! State repository trait.

use crate::error::Result;
use crate::state::model::AppState;

/// Repository for managing application state.
pub trait StateRepository: Send + Sync {
    fn get_state(&self) -> AppState;

    /// Saves the app state to storage.
    fn save_state(&self, state: AppState) -> Result<()>;

    fn get_active_user(&self) -> Option<String> {
        self.get_state().active_user_id
    }

    fn set_active_user(&self, user_id: String) -> Result<()> {
        let mut state = self.get_state();
        state.active_user_id = Some(user_id);
        self.save_state(state)
    }

    fn clear_active_user(&self) -> Result<()> {
        let mut state = self.get_state();
        state.active_user_id = None;
        self.save_state(state)
    }

    fn is_admin_unlocked(&self) -> bool {
        self.get_state().admin_unlocked
    }

    fn set_admin_unlocked(&self, unlocked: bool) -> Result<()> {
        let mut state = self.get_state();
        state.admin_unlocked = unlocked;
        self.save_state(state)
    }
}

//! Admin gate and account moderation.
//!
//! The gate is a UI gate checked against configured credentials; it is not
//! a security boundary. Every moderation action writes through the profile
//! store and then reconciles the active session, so blocking or deleting
//! the signed-in learner ends their session immediately.

use studybuddy_core::error::{Result, StudyBuddyError};
use studybuddy_core::session::Reconciliation;
use studybuddy_core::user::validation::validate_secret;
use studybuddy_core::user::{ProfileMutation, UserRecord, find_by_id_mut};

use super::StudyBuddyApp;

impl StudyBuddyApp {
    pub fn unlock_admin(&mut self, identifier: &str, secret: &str) -> Result<()> {
        if !self.config.admin.accepts(identifier, secret) {
            tracing::warn!(identifier = %identifier.trim(), "rejected admin unlock");
            return Err(StudyBuddyError::security("Invalid admin credentials"));
        }
        self.state.set_admin_unlocked(true)?;
        tracing::info!("admin panel unlocked");
        Ok(())
    }

    pub fn lock_admin(&mut self) -> Result<()> {
        self.state.set_admin_unlocked(false)?;
        tracing::info!("admin panel locked");
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.state.is_admin_unlocked()
    }

    pub fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.require_admin()?;
        Ok(self.profiles.load())
    }

    pub fn block(&mut self, user_id: &str) -> Result<Reconciliation> {
        self.set_blocked(user_id, true)
    }

    pub fn unblock(&mut self, user_id: &str) -> Result<Reconciliation> {
        self.set_blocked(user_id, false)
    }

    /// Replaces a learner's credential.
    ///
    /// The learner's session, if active, is refreshed rather than ended.
    pub fn reset_password(&mut self, user_id: &str, new_secret: &str) -> Result<Reconciliation> {
        self.require_admin()?;
        validate_secret(new_secret)?;
        let credential = self.hasher.hash(new_secret)?;
        let now = self.clock.now();

        let outcome = self.moderate(&mut |users| {
            let record = find_user(users, user_id)?;
            record.credential = credential.clone();
            record.touch(now);
            Ok(())
        })?;
        tracing::info!(user_id = %user_id, "admin reset password");
        Ok(outcome)
    }

    pub fn delete_user(&mut self, user_id: &str) -> Result<Reconciliation> {
        self.require_admin()?;
        let outcome = self.moderate(&mut |users| {
            let before = users.len();
            users.retain(|u| u.id != user_id);
            if users.len() == before {
                return Err(StudyBuddyError::not_found("user", user_id));
            }
            Ok(())
        })?;
        tracing::info!(user_id = %user_id, "admin deleted learner");
        Ok(outcome)
    }

    fn set_blocked(&mut self, user_id: &str, blocked: bool) -> Result<Reconciliation> {
        self.require_admin()?;
        let now = self.clock.now();
        let outcome = self.moderate(&mut |users| {
            let record = find_user(users, user_id)?;
            record.blocked = blocked;
            record.touch(now);
            Ok(())
        })?;
        tracing::info!(user_id = %user_id, blocked, "admin changed block flag");
        Ok(outcome)
    }

    fn moderate(&mut self, mutation: ProfileMutation<'_>) -> Result<Reconciliation> {
        let users = self.profiles.update(mutation)?;
        self.sync_session(&users)
    }
}

fn find_user<'a>(users: &'a mut [UserRecord], user_id: &str) -> Result<&'a mut UserRecord> {
    find_by_id_mut(users, user_id).ok_or_else(|| StudyBuddyError::not_found("user", user_id))
}

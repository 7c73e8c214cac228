//! The StudyBuddy controller.
//!
//! `StudyBuddyApp` owns the active session and every repository. All
//! mutations of learner records go through the profile store first; the
//! session is then re-derived from what was written, so it never holds
//! state the store does not.
//!
//! # Module Structure
//!
//! - `account`: registration, login, logout, profile self-service
//! - `moderation`: admin gate and account moderation
//! - `goal`: daily goal status and sentence checks
//! - `content`: help line, notices, links, banner and announcement

mod account;
mod content;
mod goal;
mod moderation;

use std::path::Path;
use std::sync::Arc;
use studybuddy_core::clock::{Clock, SystemClock};
use studybuddy_core::config::RootConfig;
use studybuddy_core::content::ContentRepository;
use studybuddy_core::error::{Result, StudyBuddyError};
use studybuddy_core::goal::DailyGoal;
use studybuddy_core::session::{ActiveSession, Reconciliation};
use studybuddy_core::state::StateRepository;
use studybuddy_core::user::{CredentialHasher, ProfileRepository, UserRecord, find_by_id_mut};
use studybuddy_infrastructure::{
    Argon2Hasher, ConfigService, JsonContentRepository, JsonProfileRepository,
    JsonStateRepository,
};

pub use goal::{DailyGoalStatus, GoalCheck};

pub struct StudyBuddyApp {
    profiles: Arc<dyn ProfileRepository>,
    state: Arc<dyn StateRepository>,
    content: Arc<dyn ContentRepository>,
    hasher: Arc<dyn CredentialHasher>,
    clock: Arc<dyn Clock>,
    config: RootConfig,
    goal: DailyGoal,
    session: ActiveSession,
}

impl StudyBuddyApp {
    /// Creates a controller with no active session. Call [`start`](Self::start)
    /// to restore the remembered learner.
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        state: Arc<dyn StateRepository>,
        content: Arc<dyn ContentRepository>,
        hasher: Arc<dyn CredentialHasher>,
        clock: Arc<dyn Clock>,
        config: RootConfig,
    ) -> Self {
        let goal = config.goal.daily_goal();
        Self {
            profiles,
            state,
            content,
            hasher,
            clock,
            config,
            goal,
            session: ActiveSession::empty(),
        }
    }

    /// Opens the file-backed stores under `base_path` (or the default
    /// location) and restores the remembered session.
    pub fn open(base_path: Option<&Path>) -> Result<Self> {
        let config = ConfigService::new(base_path)?.get_config();
        let mut app = Self::new(
            Arc::new(JsonProfileRepository::new(base_path)?),
            Arc::new(JsonStateRepository::new(base_path)?),
            Arc::new(JsonContentRepository::new(base_path)?),
            Arc::new(Argon2Hasher),
            Arc::new(SystemClock),
            config,
        );
        app.start()?;
        Ok(app)
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    pub fn daily_goal(&self) -> &DailyGoal {
        &self.goal
    }

    /// Re-reads the profile store and reconciles the session with it.
    ///
    /// Picks up changes written by another process since the last read.
    pub fn refresh(&mut self) -> Result<Reconciliation> {
        let users = self.profiles.load();
        self.sync_session(&users)
    }

    /// Re-derives the session from `users`.
    ///
    /// A removed or blocked record ends the session and forgets the
    /// remembered id. A surviving record is adopted with the new-day reset
    /// applied to the in-memory copy.
    fn sync_session(&mut self, users: &[UserRecord]) -> Result<Reconciliation> {
        let outcome = self.session.reconcile(users);
        match &outcome {
            Reconciliation::Refreshed(record) => {
                let mut copy = record.clone();
                self.goal.touch(&mut copy, self.clock.today());
                self.session = ActiveSession::signed_in(copy);
            }
            Reconciliation::Removed { id } => {
                tracing::info!(user_id = %id, "active learner was deleted, session ended");
                self.state.clear_active_user()?;
            }
            Reconciliation::Blocked { id, username } => {
                tracing::info!(user_id = %id, username = %username, "active learner was blocked, session ended");
                self.state.clear_active_user()?;
            }
            Reconciliation::NoSession => {}
        }
        Ok(outcome)
    }

    fn require_user(&self) -> Result<&UserRecord> {
        self.session
            .user()
            .ok_or_else(|| StudyBuddyError::security("No learner is signed in"))
    }

    fn require_admin(&self) -> Result<()> {
        if self.state.is_admin_unlocked() {
            Ok(())
        } else {
            Err(StudyBuddyError::security("Admin panel is locked"))
        }
    }

    /// Applies `f` to the active learner's stored record and writes it back.
    ///
    /// Fails with `NotFound` or `Blocked` when the record is gone or blocked
    /// in the store; the session is ended in both cases and nothing is
    /// written.
    fn mutate_active<T>(
        &mut self,
        mut f: impl FnMut(&mut UserRecord) -> Result<T>,
    ) -> Result<T> {
        let id = self.require_user()?.id.clone();
        let mut output = None;

        let result = self.profiles.update(&mut |users| {
            let record =
                find_by_id_mut(users, &id).ok_or_else(|| StudyBuddyError::not_found("user", &id))?;
            if record.blocked {
                return Err(StudyBuddyError::Blocked {
                    username: record.username.clone(),
                });
            }
            output = Some(f(record)?);
            Ok(())
        });

        match result {
            Ok(users) => {
                self.sync_session(&users)?;
                output.ok_or_else(|| StudyBuddyError::internal("profile mutation produced no value"))
            }
            Err(e) if e.is_not_found() || e.is_blocked() => {
                let users = self.profiles.load();
                self.sync_session(&users)?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

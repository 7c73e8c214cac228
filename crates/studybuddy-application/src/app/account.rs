use studybuddy_core::error::{Result, StudyBuddyError};
use studybuddy_core::session::{ActiveSession, resolve_at_startup};
use studybuddy_core::stats::LevelStats;
use studybuddy_core::user::validation::{validate_secret, validate_username};
use studybuddy_core::user::{ProfileUpdate, UserRecord, find_by_id_mut, find_by_username};

use super::StudyBuddyApp;

impl StudyBuddyApp {
    /// Restores the remembered learner at process start.
    ///
    /// The new-day reset is applied to the session copy only. A remembered
    /// id that no longer resolves (deleted or blocked) is forgotten.
    pub fn start(&mut self) -> Result<Option<&UserRecord>> {
        let remembered = self.state.get_active_user();
        let users = self.profiles.load();

        match resolve_at_startup(
            remembered.as_deref(),
            &users,
            &self.goal,
            self.clock.today(),
        ) {
            Some(record) => {
                tracing::debug!(user_id = %record.id, "restored session");
                self.session = ActiveSession::signed_in(record);
            }
            None => {
                self.session.clear();
                if let Some(id) = remembered {
                    tracing::info!(user_id = %id, "remembered learner is unavailable, forgetting");
                    self.state.clear_active_user()?;
                }
            }
        }
        Ok(self.session.user())
    }

    pub fn current_user(&self) -> Option<&UserRecord> {
        self.session.user()
    }

    pub fn level_stats(&self) -> Option<LevelStats> {
        self.session.user().map(|u| LevelStats::from_points(u.points))
    }

    /// Creates an account and signs it in.
    ///
    /// A username already present in the store (ignoring case) is rejected
    /// and the store is left untouched.
    pub fn register(
        &mut self,
        username: &str,
        secret: &str,
        name: Option<&str>,
    ) -> Result<UserRecord> {
        let username = validate_username(username)?;
        validate_secret(secret)?;

        let credential = self.hasher.hash(secret)?;
        let record = UserRecord::new(&username, credential, self.clock.today(), self.clock.now())
            .with_name(name.unwrap_or_default());

        self.profiles.update(&mut |users| {
            if find_by_username(users, &username).is_some() {
                return Err(StudyBuddyError::validation(format!(
                    "Username '{}' is already taken",
                    username
                )));
            }
            users.push(record.clone());
            Ok(())
        })?;

        tracing::info!(user_id = %record.id, username = %record.username, "registered learner");
        self.sign_in(record.clone())?;
        Ok(record)
    }

    /// Signs in with username and secret.
    ///
    /// Blocked accounts are refused with `Blocked`. A legacy plaintext
    /// credential is replaced with a hash, and the new-day reset is written
    /// through when the stored day is stale.
    pub fn login(&mut self, username: &str, secret: &str) -> Result<UserRecord> {
        let found = self
            .profiles
            .find_by_credentials(username, secret, self.hasher.as_ref())?
            .ok_or_else(|| StudyBuddyError::validation("Invalid username or password"))?;

        if found.blocked {
            tracing::info!(username = %found.username, "refused login for blocked learner");
            return Err(StudyBuddyError::Blocked {
                username: found.username,
            });
        }

        let today = self.clock.today();
        let now = self.clock.now();
        let rehashed = if found.credential.is_legacy() {
            Some(self.hasher.hash(secret)?)
        } else {
            None
        };

        let users = if rehashed.is_some() || found.last_challenge_date != today {
            let goal = self.goal;
            self.profiles.update(&mut |users| {
                let record = find_by_id_mut(users, &found.id)
                    .ok_or_else(|| StudyBuddyError::not_found("user", &found.id))?;
                if record.blocked {
                    return Err(StudyBuddyError::Blocked {
                        username: record.username.clone(),
                    });
                }
                if let Some(credential) = &rehashed {
                    record.credential = credential.clone();
                }
                goal.touch(record, today);
                record.touch(now);
                Ok(())
            })?
        } else {
            self.profiles.load()
        };

        let record = users
            .into_iter()
            .find(|u| u.id == found.id)
            .ok_or_else(|| StudyBuddyError::not_found("user", &found.id))?;

        if rehashed.is_some() {
            tracing::info!(username = %record.username, "upgraded legacy credential");
        }
        tracing::info!(user_id = %record.id, username = %record.username, "learner signed in");
        self.sign_in(record.clone())?;
        Ok(record)
    }

    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.session.user() {
            tracing::info!(user_id = %user.id, "learner signed out");
        }
        self.session.clear();
        self.state.clear_active_user()
    }

    /// Edits the active learner's own profile.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<UserRecord> {
        let now = self.clock.now();
        self.mutate_active(|record| {
            update.apply(record)?;
            record.touch(now);
            Ok(record.clone())
        })
    }

    fn sign_in(&mut self, record: UserRecord) -> Result<()> {
        self.state.set_active_user(record.id.clone())?;
        self.session = ActiveSession::signed_in(record);
        Ok(())
    }
}

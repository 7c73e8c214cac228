//! UserRecord domain model.
//!
//! One registered learner: identity, profile, progress and moderation state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Bio given to freshly registered learners.
pub const DEFAULT_BIO: &str = "আমি এআই-এর সাথে শিখতে চাই!";

/// Stored secret for a learner account.
///
/// New and reset credentials are always `Argon2` PHC strings. `Plain` only
/// appears on records migrated from the legacy schema and is replaced with a
/// hash on the next successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", content = "value", rename_all = "snake_case")]
pub enum Credential {
    Argon2(String),
    Plain(String),
}

impl Credential {
    /// Returns true when the stored value still needs to be hashed.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Credential::Plain(_))
    }
}

/// User record domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier (UUID format). Never changes after creation.
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// Stored secret.
    pub credential: Credential,
    /// Display name.
    pub name: String,
    /// Free-text biography.
    pub bio: String,
    /// Embedded image data URL or remote URL.
    pub photo_url: Option<String>,
    /// Accumulated reward points.
    pub points: u64,
    /// Consecutive days with at least one daily goal success.
    pub streak: u32,
    /// Daily goal successes recorded on `last_challenge_date`.
    pub daily_challenge_count: u32,
    /// Day the daily counter was last reset.
    pub last_challenge_date: NaiveDate,
    /// Day of the most recent daily goal success.
    pub last_success_date: Option<NaiveDate>,
    /// Registration day.
    pub join_date: NaiveDate,
    /// Set by an administrator; a blocked record cannot hold a session.
    pub blocked: bool,
    /// Last modification instant.
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a fresh record for a registration on `today`.
    pub fn new(
        username: impl Into<String>,
        credential: Credential,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        let username = username.into();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: username.clone(),
            username,
            credential,
            bio: DEFAULT_BIO.to_string(),
            photo_url: None,
            points: 0,
            streak: 0,
            daily_challenge_count: 0,
            last_challenge_date: today,
            last_success_date: None,
            join_date: today,
            blocked: false,
            updated_at: now,
        }
    }

    /// Sets the display name, keeping the username as fallback.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.name = name.trim().to_string();
        }
        self
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Self-service profile edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    /// `Some(None)` removes the photo.
    pub photo_url: Option<Option<String>>,
}

impl ProfileUpdate {
    /// Applies the edit to `record`.
    ///
    /// A blank display name is rejected and leaves the record unchanged.
    pub fn apply(&self, record: &mut UserRecord) -> crate::error::Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(crate::error::StudyBuddyError::validation(
                    "Display name cannot be empty",
                ));
            }
        }

        if let Some(name) = &self.name {
            record.name = name.trim().to_string();
        }
        if let Some(bio) = &self.bio {
            record.bio = bio.clone();
        }
        if let Some(photo) = &self.photo_url {
            record.photo_url = photo.clone();
        }
        Ok(())
    }
}

//! UserRecord DTOs and migrations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use studybuddy_core::user::{Credential, DEFAULT_BIO, UserRecord};

/// Legacy record written by the browser client (camelCase, display-string
/// dates, plaintext password).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct UserRecordV1_0_0 {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub daily_challenge_count: u32,
    #[serde(default)]
    pub last_challenge_date: String,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub is_blocked: bool,
}

/// Current record shape.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct UserRecordV1_1_0 {
    pub id: String,
    pub username: String,
    pub credential: Credential,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub daily_challenge_count: u32,
    pub last_challenge_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_success_date: Option<NaiveDate>,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// Type alias for the latest UserRecord version.
pub type UserRecordDTO = UserRecordV1_1_0;

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from UserRecordV1_0_0 to UserRecordV1_1_0.
///
/// Unparseable dates become the Unix epoch day, which forces the daily
/// reset on first use. The plaintext password is kept as a legacy
/// credential and hashed at the next successful login.
impl MigratesTo<UserRecordV1_1_0> for UserRecordV1_0_0 {
    fn migrate(self) -> UserRecordV1_1_0 {
        let last_challenge_date = parse_legacy_date(&self.last_challenge_date).unwrap_or_default();
        let join_date = parse_legacy_date(&self.join_date).unwrap_or(last_challenge_date);

        let username = if self.username.trim().is_empty() {
            legacy_username(&self.name, &self.id)
        } else {
            self.username.trim().to_string()
        };
        let name = if self.name.trim().is_empty() {
            username.clone()
        } else {
            self.name
        };
        let id = if self.id.is_empty() {
            username.clone()
        } else {
            self.id
        };

        UserRecordV1_1_0 {
            id,
            username,
            credential: Credential::Plain(self.password),
            name,
            bio: if self.bio.is_empty() {
                DEFAULT_BIO.to_string()
            } else {
                self.bio
            },
            photo_url: self.photo_url,
            points: self.points,
            streak: self.streak,
            daily_challenge_count: self.daily_challenge_count,
            last_challenge_date,
            last_success_date: None,
            join_date,
            blocked: self.is_blocked,
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

/// Accepts `Thu Oct 16 2026`, ISO dates and `d/m/yyyy` with Bengali digits.
fn parse_legacy_date(raw: &str) -> Option<NaiveDate> {
    let ascii: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '০'..='৯' => char::from(b'0' + (c as u32 - '০' as u32) as u8),
            other => other,
        })
        .collect();

    ["%a %b %d %Y", "%Y-%m-%d", "%d/%m/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&ascii, format).ok())
}

fn legacy_username(name: &str, id: &str) -> String {
    let compact: String = name.split_whitespace().collect::<Vec<_>>().join("_");
    if compact.is_empty() {
        format!("learner_{}", id)
    } else {
        compact.to_lowercase()
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<UserRecord> for UserRecordV1_1_0 {
    fn into_domain(self) -> UserRecord {
        UserRecord {
            id: self.id,
            username: self.username,
            credential: self.credential,
            name: self.name,
            bio: self.bio,
            photo_url: self.photo_url,
            points: self.points,
            streak: self.streak,
            daily_challenge_count: self.daily_challenge_count,
            last_challenge_date: self.last_challenge_date,
            last_success_date: self.last_success_date,
            join_date: self.join_date,
            blocked: self.blocked,
            updated_at: self.updated_at,
        }
    }
}

impl FromDomain<UserRecord> for UserRecordV1_1_0 {
    fn from_domain(record: UserRecord) -> Self {
        UserRecordV1_1_0 {
            id: record.id,
            username: record.username,
            credential: record.credential,
            name: record.name,
            bio: record.bio,
            photo_url: record.photo_url,
            points: record.points,
            streak: record.streak,
            daily_challenge_count: record.daily_challenge_count,
            last_challenge_date: record.last_challenge_date,
            last_success_date: record.last_success_date,
            join_date: record.join_date,
            blocked: record.blocked,
            updated_at: record.updated_at,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for UserRecord entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: snake_case fields, typed dates, tagged credential
/// - V1.1.0 → UserRecord: Converts DTO to domain model
pub fn create_user_record_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let user_record_path = version_migrate::Migrator::define("user_record")
        .from::<UserRecordV1_0_0>()
        .step::<UserRecordV1_1_0>()
        .into_with_save::<UserRecord>();

    migrator
        .register(user_record_path)
        .expect("Failed to register user_record migration path");

    migrator
}

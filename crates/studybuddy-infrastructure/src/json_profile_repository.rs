//! JSON-backed profile store.
//!
//! The whole learner collection lives in one document (`users.json`):
//!
//! ```json
//! { "users": [ { "version": "1.1.0", "id": "...", ... } ] }
//! ```
//!
//! Every record carries its own schema version so that a file written by an
//! older client migrates record by record on load.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use studybuddy_core::error::{Result, StudyBuddyError};
use studybuddy_core::user::{ProfileMutation, ProfileRepository, UserRecord};
use version_migrate::FromDomain;

use crate::dto::{UserRecordDTO, create_user_record_migrator};
use crate::paths::{ServiceType, StudyBuddyPaths};
use crate::storage::AtomicJsonFile;

const ENTITY: &str = "user_record";
const LEGACY_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UsersDocument {
    #[serde(default)]
    users: Vec<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct JsonProfileRepository {
    storage: AtomicJsonFile<UsersDocument>,
}

impl JsonProfileRepository {
    /// Opens the store at the default location (or under `base_path`).
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = StudyBuddyPaths::new(base_path).get_path(ServiceType::Profiles)?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            storage: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    fn read_document(&self) -> Result<Vec<UserRecord>> {
        let document = self.storage.load()?.unwrap_or_default();
        decode(document)
    }
}

/// Records without a version tag predate versioning.
fn decode(document: UsersDocument) -> Result<Vec<UserRecord>> {
    if document.users.is_empty() {
        return Ok(Vec::new());
    }

    let values: Vec<serde_json::Value> = document
        .users
        .into_iter()
        .map(|mut value| {
            if let Some(object) = value.as_object_mut() {
                object
                    .entry("version")
                    .or_insert_with(|| serde_json::Value::String(LEGACY_VERSION.to_string()));
            }
            value
        })
        .collect();

    let migrator = create_user_record_migrator();
    let users = migrator.load_vec_flat_from(ENTITY, values)?;
    Ok(users)
}

fn encode(users: &[UserRecord]) -> Result<UsersDocument> {
    let dtos: Vec<UserRecordDTO> = users
        .iter()
        .cloned()
        .map(UserRecordDTO::from_domain)
        .collect();

    let migrator = create_user_record_migrator();
    let json = migrator.save_vec_flat(dtos)?;
    let users: Vec<serde_json::Value> = serde_json::from_str(&json)?;
    Ok(UsersDocument { users })
}

impl ProfileRepository for JsonProfileRepository {
    fn load(&self) -> Vec<UserRecord> {
        match self.read_document() {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(
                    path = %self.path().display(),
                    error = %e,
                    "profile store unreadable, treating as empty"
                );
                Vec::new()
            }
        }
    }

    fn save_all(&self, users: &[UserRecord]) -> Result<()> {
        let document = encode(users)?;
        self.storage.save(&document)?;
        tracing::debug!(count = users.len(), "saved profile store");
        Ok(())
    }

    fn update(&self, mutation: ProfileMutation<'_>) -> Result<Vec<UserRecord>> {
        let mut written = Vec::new();
        self.storage
            .update(UsersDocument::default(), |document| {
                // An unreadable store must not be overwritten with a partial one.
                let mut users = decode(std::mem::take(document))?;
                mutation(&mut users)?;
                *document = encode(&users)?;
                written = users;
                Ok::<(), StudyBuddyError>(())
            })?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use studybuddy_core::user::Credential;
    use tempfile::TempDir;

    fn repo(dir: &TempDir) -> JsonProfileRepository {
        JsonProfileRepository::with_path(dir.path().join("users.json"))
    }

    fn user(name: &str) -> UserRecord {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        UserRecord::new(name, Credential::Argon2(format!("hash-{name}")), today, Utc::now())
    }

    #[test]
    fn test_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(repo(&dir).load().is_empty());
    }

    #[test]
    fn test_save_all_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let users = vec![user("alice"), user("bob")];

        repo.save_all(&users).unwrap();
        assert_eq!(repo.load(), users);
        assert_eq!(repo.find_by_username("BOB").unwrap().id, users[1].id);
        assert_eq!(repo.find_by_id(&users[0].id).unwrap().username, "alice");
    }

    #[test]
    fn test_save_all_of_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        repo.save_all(&[user("alice"), user("bob")]).unwrap();

        let before = std::fs::read_to_string(repo.path()).unwrap();
        repo.save_all(&repo.load()).unwrap();
        let after = std::fs::read_to_string(repo.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_corrupt_store_loads_empty() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        std::fs::write(repo.path(), "{{{").unwrap();
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_update_rejects_corrupt_store() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        std::fs::write(repo.path(), r#"{"users":[{"version":"9.9.9"}]}"#).unwrap();

        let result = repo.update(&mut |users| {
            users.clear();
            Ok(())
        });
        assert!(result.is_err());
        assert!(std::fs::read_to_string(repo.path()).unwrap().contains("9.9.9"));
    }

    #[test]
    fn test_update_applies_mutation() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let alice = user("alice");
        repo.save_all(&[alice.clone()]).unwrap();

        let written = repo
            .update(&mut |users| {
                users[0].points += 10;
                users.push(user("bob"));
                Ok(())
            })
            .unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(repo.load()[0].points, 10);
    }

    #[test]
    fn test_failed_mutation_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        repo.save_all(&[user("alice")]).unwrap();

        let err = repo
            .update(&mut |users| {
                users.clear();
                Err(StudyBuddyError::validation("nope"))
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(repo.load().len(), 1);
    }

    #[test]
    fn test_unversioned_legacy_records_migrate() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        std::fs::write(
            repo.path(),
            r#"{"users":[{"id":"1","username":"rahim","password":"1234","name":"Rahim","points":30,"dailyChallengeCount":1,"lastChallengeDate":"Thu Oct 15 2026","joinDate":"2026-09-01"}]}"#,
        )
        .unwrap();

        let users = repo.load();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].credential, Credential::Plain("1234".into()));
        assert_eq!(users[0].points, 30);

        repo.save_all(&users).unwrap();
        let raw = std::fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("\"version\": \"1.1.0\""));
    }
}

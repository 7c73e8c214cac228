//! Profile store trait and credential hashing seam.

use super::model::{Credential, UserRecord};
use super::validation::same_username;
use crate::error::Result;

/// Hashes and verifies learner secrets.
pub trait CredentialHasher: Send + Sync {
    /// Produces a credential for a newly chosen secret.
    fn hash(&self, secret: &str) -> Result<Credential>;

    /// Checks `secret` against a stored credential.
    fn verify(&self, secret: &str, credential: &Credential) -> Result<bool>;
}

/// A mutation applied to the whole profile collection.
pub type ProfileMutation<'a> = &'a mut dyn FnMut(&mut Vec<UserRecord>) -> Result<()>;

/// Durable store for every `UserRecord`.
///
/// The whole collection is the unit of persistence: callers read it, change
/// it, and write it back in one call.
pub trait ProfileRepository: Send + Sync {
    /// Returns every stored record.
    ///
    /// A missing or unreadable store yields an empty collection.
    fn load(&self) -> Vec<UserRecord>;

    /// Replaces the stored collection.
    fn save_all(&self, users: &[UserRecord]) -> Result<()>;

    /// Re-reads the stored collection, applies `mutation` and writes the
    /// result back while holding the store's write lock.
    ///
    /// Nothing is written when `mutation` fails. Returns the collection as
    /// written.
    fn update(&self, mutation: ProfileMutation<'_>) -> Result<Vec<UserRecord>>;

    fn find_by_id(&self, id: &str) -> Option<UserRecord> {
        self.load().into_iter().find(|u| u.id == id)
    }

    fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        find_by_username(&self.load(), username).cloned()
    }

    /// Looks up a record by username and verifies the secret.
    ///
    /// Blocked records are still returned; refusing them is the caller's job.
    fn find_by_credentials(
        &self,
        username: &str,
        secret: &str,
        hasher: &dyn CredentialHasher,
    ) -> Result<Option<UserRecord>> {
        let Some(record) = self.find_by_username(username) else {
            return Ok(None);
        };
        if hasher.verify(secret, &record.credential)? {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }
}

pub fn find_by_username<'a>(users: &'a [UserRecord], username: &str) -> Option<&'a UserRecord> {
    users.iter().find(|u| same_username(&u.username, username))
}

pub fn find_by_id_mut<'a>(users: &'a mut [UserRecord], id: &str) -> Option<&'a mut UserRecord> {
    users.iter_mut().find(|u| u.id == id)
}

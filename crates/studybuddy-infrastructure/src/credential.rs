//! Argon2 credential hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use studybuddy_core::error::{Result, StudyBuddyError};
use studybuddy_core::user::{Credential, CredentialHasher};

/// Argon2id with default parameters, stored as PHC strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> Result<Credential> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| StudyBuddyError::security(format!("Password hashing failed: {}", e)))?;
        Ok(Credential::Argon2(hash.to_string()))
    }

    fn verify(&self, secret: &str, credential: &Credential) -> Result<bool> {
        match credential {
            Credential::Argon2(phc) => {
                let parsed = PasswordHash::new(phc).map_err(|e| {
                    StudyBuddyError::security(format!("Invalid password hash format: {}", e))
                })?;
                match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(StudyBuddyError::security(format!(
                        "Password verification failed: {}",
                        e
                    ))),
                }
            }
            // A migrated record without a password cannot be signed into.
            Credential::Plain(stored) => Ok(!stored.is_empty() && stored == secret),
        }
    }
}

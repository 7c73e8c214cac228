//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: `UserRecord`, `Credential`, `ProfileUpdate`
//! - `repository`: `ProfileRepository` and `CredentialHasher` traits
//! - `validation`: username and secret rules

mod model;
mod repository;
pub mod validation;

// Re-export public API
pub use model::{Credential, DEFAULT_BIO, ProfileUpdate, UserRecord};
pub use repository::{
    CredentialHasher, ProfileMutation, ProfileRepository, find_by_id_mut, find_by_username,
};

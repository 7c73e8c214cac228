//! File-backed implementations of the StudyBuddy repositories and services.

pub mod config_service;
pub mod credential;
pub mod dto;
pub mod json_content_repository;
pub mod json_profile_repository;
pub mod json_state_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::credential::Argon2Hasher;
pub use crate::json_content_repository::JsonContentRepository;
pub use crate::json_profile_repository::JsonProfileRepository;
pub use crate::json_state_repository::JsonStateRepository;
pub use crate::paths::{ServiceType, StudyBuddyPaths};
pub use crate::secret_service::SecretService;

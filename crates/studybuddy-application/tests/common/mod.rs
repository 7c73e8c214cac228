#![allow(dead_code)]

use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;
use studybuddy_application::StudyBuddyApp;
use studybuddy_core::clock::FixedClock;
use studybuddy_core::config::RootConfig;
use studybuddy_core::error::Result;
use studybuddy_core::user::{Credential, CredentialHasher};
use studybuddy_infrastructure::{JsonContentRepository, JsonProfileRepository, JsonStateRepository};
use tempfile::TempDir;

pub const ADMIN_ID: &str = "admin@studybuddy.local";
pub const ADMIN_SECRET: &str = "change-me";

/// Reversible stand-in for Argon2 so the suites stay fast.
pub struct TestHasher;

impl CredentialHasher for TestHasher {
    fn hash(&self, secret: &str) -> Result<Credential> {
        Ok(Credential::Argon2(format!("test${secret}")))
    }

    fn verify(&self, secret: &str, credential: &Credential) -> Result<bool> {
        Ok(match credential {
            Credential::Argon2(stored) => stored == &format!("test${secret}"),
            Credential::Plain(stored) => !stored.is_empty() && stored == secret,
        })
    }
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

/// One data directory shared by any number of app instances, each standing
/// in for a separate client process.
pub struct Fixture {
    pub dir: TempDir,
    pub clock: Arc<FixedClock>,
    pub config: RootConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(RootConfig::default())
    }

    pub fn with_config(config: RootConfig) -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            clock: Arc::new(FixedClock::new(day(16))),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Opens a client and restores its remembered session.
    pub fn open(&self) -> StudyBuddyApp {
        self.open_with(Arc::new(TestHasher))
    }

    pub fn open_with(&self, hasher: Arc<dyn CredentialHasher>) -> StudyBuddyApp {
        let base = self.dir.path();
        let mut app = StudyBuddyApp::new(
            Arc::new(JsonProfileRepository::with_path(base.join("users.json"))),
            Arc::new(JsonStateRepository::with_path(base.join("app_state.json"))),
            Arc::new(JsonContentRepository::with_path(base.join("content.json"))),
            hasher,
            self.clock.clone(),
            self.config.clone(),
        );
        app.start().unwrap();
        app
    }

    pub fn open_admin(&self) -> StudyBuddyApp {
        let mut app = self.open();
        app.unlock_admin(ADMIN_ID, ADMIN_SECRET).unwrap();
        app
    }
}

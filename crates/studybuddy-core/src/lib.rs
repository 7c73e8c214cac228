//! Domain layer for StudyBuddy.
//!
//! Models, repository traits and the rules that govern them: the daily goal
//! counter, session reconciliation, level statistics and tutor task
//! definitions. Nothing in this crate performs I/O.

pub mod clock;
pub mod config;
pub mod content;
pub mod error;
pub mod goal;
pub mod session;
pub mod state;
pub mod stats;
pub mod tutor;
pub mod user;

// Re-export common error type
pub use error::StudyBuddyError;

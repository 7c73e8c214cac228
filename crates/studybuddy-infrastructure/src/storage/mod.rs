//! Storage layer for safe file operations.

pub mod atomic_json;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};

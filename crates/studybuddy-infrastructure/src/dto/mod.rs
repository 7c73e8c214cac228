//! Versioned persistence shapes.
//!
//! Each entity keeps every schema version it has ever been written in plus a
//! migrator factory that walks old documents forward to the domain model.

pub mod app_state;
pub mod user_record;

pub use app_state::{AppStateV1_0_0, AppStateV1_1_0, create_app_state_migrator};
pub use user_record::{
    UserRecordDTO, UserRecordV1_0_0, UserRecordV1_1_0, create_user_record_migrator,
};

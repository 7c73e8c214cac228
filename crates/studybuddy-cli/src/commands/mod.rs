pub mod account;
pub mod admin;
pub mod config;
pub mod content;
pub mod tutor;

use anyhow::{Result, bail};
use std::path::Path;
use studybuddy_application::StudyBuddyApp;
use studybuddy_core::user::UserRecord;
use studybuddy_interaction::load_image;

pub fn require_session(app: &StudyBuddyApp) -> Result<&UserRecord> {
    match app.current_user() {
        Some(user) => Ok(user),
        None => bail!("Not signed in. Run `studybuddy login <username> --password <password>` first."),
    }
}

/// Reads an image file into a `data:` URL.
pub async fn image_data_url(path: &Path) -> Result<String> {
    Ok(load_image(path).await?.to_data_url())
}

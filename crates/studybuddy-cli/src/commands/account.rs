use anyhow::Result;
use std::path::PathBuf;
use studybuddy_application::StudyBuddyApp;
use studybuddy_core::user::ProfileUpdate;

use super::{image_data_url, require_session};

pub fn register(
    app: &mut StudyBuddyApp,
    username: &str,
    password: &str,
    name: Option<&str>,
) -> Result<()> {
    let user = app.register(username, password, name)?;
    println!("✅ Welcome, {}! Your account '{}' is ready.", user.name, user.username);
    Ok(())
}

pub fn login(app: &mut StudyBuddyApp, username: &str, password: &str) -> Result<()> {
    let user = app.login(username, password)?;
    println!("✅ Signed in as {} ({} points)", user.name, user.points);
    Ok(())
}

pub fn logout(app: &mut StudyBuddyApp) -> Result<()> {
    app.logout()?;
    println!("👋 Signed out");
    Ok(())
}

pub fn whoami(app: &StudyBuddyApp) -> Result<()> {
    let user = require_session(app)?;
    println!("{} (@{})", user.name, user.username);
    println!("  {}", user.bio);
    if let Some(stats) = app.level_stats() {
        println!(
            "  Level {} · {} · {} / {} points ({:.0}%)",
            stats.level, stats.tier, user.points, stats.next_threshold, stats.progress
        );
    }
    println!("  Streak: {} day(s) · Joined {}", user.streak, user.join_date);
    goal_status(app)
}

pub fn goal_status(app: &StudyBuddyApp) -> Result<()> {
    let status = app.goal_status()?;
    println!(
        "🎯 Daily goal: {}/{} ({} left today)",
        status.count, status.ceiling, status.remaining
    );
    Ok(())
}

pub async fn profile(
    app: &mut StudyBuddyApp,
    name: Option<String>,
    bio: Option<String>,
    photo: Option<PathBuf>,
    remove_photo: bool,
) -> Result<()> {
    let photo_url = match (photo, remove_photo) {
        (Some(path), _) => Some(Some(image_data_url(&path).await?)),
        (None, true) => Some(None),
        (None, false) => None,
    };
    let user = app.update_profile(ProfileUpdate {
        name,
        bio,
        photo_url,
    })?;
    println!("✅ Profile saved for {}", user.name);
    Ok(())
}

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;
use studybuddy_application::StudyBuddyApp;
use studybuddy_core::content::{AdminProfile, STANDARD_BANNER_SIZES};
use studybuddy_core::session::Reconciliation;

use super::image_data_url;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Open the admin panel
    Unlock {
        /// Admin email or phone
        identifier: String,
        #[arg(long)]
        password: String,
    },
    /// Close the admin panel
    Lock,
    /// List every learner
    Users,
    Block { user_id: String },
    Unblock { user_id: String },
    ResetPassword {
        user_id: String,
        #[arg(long)]
        password: String,
    },
    Delete { user_id: String },
    /// Reply to a learner's help-line thread
    Reply { user_id: String, text: String },
    /// Post a notice (the three newest are kept)
    Notice { text: String },
    ClearNotices,
    /// Add a study link
    AddLink { title: String, url: String },
    DeleteLink { link_id: String },
    /// Set the home banner image
    Banner {
        image: PathBuf,
        /// Size descriptor, e.g. "300 x 250 px"
        #[arg(long)]
        size: Option<String>,
    },
    ClearBanner,
    /// Publish the home announcement
    Post {
        text: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    RemovePost,
    /// Edit the admin's public profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
}

pub async fn run(app: &mut StudyBuddyApp, action: AdminAction) -> Result<()> {
    match action {
        AdminAction::Unlock {
            identifier,
            password,
        } => {
            app.unlock_admin(&identifier, &password)?;
            println!("🔓 Admin panel unlocked");
        }
        AdminAction::Lock => {
            app.lock_admin()?;
            println!("🔒 Admin panel locked");
        }
        AdminAction::Users => {
            let users = app.list_users()?;
            println!("{} learner(s)", users.len());
            for user in users {
                println!(
                    "  {} @{:<16} {:<20} {:>5} pts {}",
                    user.id,
                    user.username,
                    user.name,
                    user.points,
                    if user.blocked { "⛔ blocked" } else { "" }
                );
            }
        }
        AdminAction::Block { user_id } => report("Blocked", app.block(&user_id)?),
        AdminAction::Unblock { user_id } => report("Unblocked", app.unblock(&user_id)?),
        AdminAction::ResetPassword { user_id, password } => {
            report("Password reset for", app.reset_password(&user_id, &password)?)
        }
        AdminAction::Delete { user_id } => report("Deleted", app.delete_user(&user_id)?),
        AdminAction::Reply { user_id, text } => {
            app.reply_help_message(&user_id, &text)?;
            println!("✅ Reply sent");
        }
        AdminAction::Notice { text } => {
            app.post_notice(&text)?;
            println!("📌 Notice posted");
        }
        AdminAction::ClearNotices => {
            app.clear_notices()?;
            println!("🧹 Notices cleared");
        }
        AdminAction::AddLink { title, url } => {
            let link = app.add_study_link(&title, &url)?;
            println!("🔗 Added link {}", link.id);
        }
        AdminAction::DeleteLink { link_id } => {
            app.delete_study_link(&link_id)?;
            println!("🗑  Link removed");
        }
        AdminAction::Banner { image, size } => {
            app.set_banner(image_data_url(&image).await?)?;
            if let Some(descriptor) = size {
                let size = app.set_banner_size(&descriptor)?;
                if !STANDARD_BANNER_SIZES.contains(&size.descriptor().as_str()) {
                    println!("ℹ️  {} is not a standard banner size", size.descriptor());
                }
            }
            println!("🖼  Banner set ({})", app.banner().size.descriptor());
        }
        AdminAction::ClearBanner => {
            app.clear_banner()?;
            println!("🧹 Banner removed");
        }
        AdminAction::Post { text, image } => {
            let image = match image {
                Some(path) => Some(image_data_url(&path).await?),
                None => None,
            };
            app.publish_post(&text, image)?;
            println!("📣 Announcement published");
        }
        AdminAction::RemovePost => {
            app.remove_post()?;
            println!("🧹 Announcement removed");
        }
        AdminAction::Profile { name, email, photo } => {
            let current = app.admin_profile();
            let photo_url = match photo {
                Some(path) => Some(image_data_url(&path).await?),
                None => current.photo_url,
            };
            app.update_admin_profile(AdminProfile {
                name: name.unwrap_or(current.name),
                email: email.unwrap_or(current.email),
                photo_url,
            })?;
            println!("✅ Admin profile saved");
        }
    }
    Ok(())
}

fn report(action: &str, outcome: Reconciliation) {
    println!("✅ {action} learner");
    if outcome.ends_session() {
        println!("   The signed-in session on this device was ended");
    }
}

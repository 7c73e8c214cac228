//! Help line and admin-published content.

use studybuddy_core::content::{
    AdminPost, AdminProfile, BannerSize, ContentBoard, HelpMessage, HomeBanner, Notice, StudyLink,
};
use studybuddy_core::error::{Result, StudyBuddyError};

use super::StudyBuddyApp;

impl StudyBuddyApp {
    /// Posts a message from the active learner to their help-line thread.
    pub fn send_help_message(&mut self, text: &str) -> Result<HelpMessage> {
        let user = self.require_user()?.clone();
        let now = self.clock.now();
        self.edit_content(|board| board.add_help_message(&user.id, &user.name, text, false, now))
    }

    /// Answers a learner's thread as the administrator.
    pub fn reply_help_message(&mut self, user_id: &str, text: &str) -> Result<HelpMessage> {
        self.require_admin()?;
        let now = self.clock.now();
        self.edit_content(|board| {
            let admin_name = board.admin_profile.name.clone();
            board.add_help_message(user_id, &admin_name, text, true, now)
        })
    }

    /// Every thread for the admin, the learner's own thread otherwise.
    pub fn help_thread(&self) -> Vec<HelpMessage> {
        let board = self.content.load();
        if self.is_admin() {
            board.help_thread(None, true)
        } else {
            board.help_thread(self.session.user_id(), false)
        }
    }

    pub fn post_notice(&mut self, text: &str) -> Result<Notice> {
        self.require_admin()?;
        let now = self.clock.now();
        self.edit_content(|board| board.post_notice(text, now))
    }

    pub fn clear_notices(&mut self) -> Result<()> {
        self.require_admin()?;
        self.edit_content(|board| {
            board.clear_notices();
            Ok(())
        })
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.content.load().notices
    }

    pub fn add_study_link(&mut self, title: &str, url: &str) -> Result<StudyLink> {
        self.require_admin()?;
        let today = self.clock.today();
        self.edit_content(|board| board.add_study_link(title, url, today))
    }

    pub fn delete_study_link(&mut self, link_id: &str) -> Result<()> {
        self.require_admin()?;
        self.edit_content(|board| board.delete_study_link(link_id))
    }

    pub fn study_links(&self) -> Vec<StudyLink> {
        self.content.load().study_links
    }

    /// Sets the home banner image (a data URL), keeping its size.
    pub fn set_banner(&mut self, image: String) -> Result<()> {
        self.require_admin()?;
        if image.trim().is_empty() {
            return Err(StudyBuddyError::validation("Banner image cannot be empty"));
        }
        self.edit_content(|board| {
            board.banner.image = Some(image.clone());
            Ok(())
        })
    }

    /// Parses a descriptor such as `"300 x 250 px"` and stores it.
    pub fn set_banner_size(&mut self, descriptor: &str) -> Result<BannerSize> {
        self.require_admin()?;
        let size = BannerSize::parse(descriptor);
        self.edit_content(|board| {
            board.banner.size = size;
            Ok(size)
        })
    }

    pub fn clear_banner(&mut self) -> Result<()> {
        self.require_admin()?;
        self.edit_content(|board| {
            board.banner.image = None;
            Ok(())
        })
    }

    pub fn banner(&self) -> HomeBanner {
        self.content.load().banner
    }

    /// Replaces the home announcement.
    pub fn publish_post(&mut self, text: &str, image: Option<String>) -> Result<()> {
        self.require_admin()?;
        let now = self.clock.now();
        self.edit_content(|board| board.publish_post(text, image.clone(), now))
    }

    pub fn remove_post(&mut self) -> Result<()> {
        self.require_admin()?;
        self.edit_content(|board| {
            board.post = None;
            Ok(())
        })
    }

    pub fn post(&self) -> Option<AdminPost> {
        self.content.load().post
    }

    pub fn update_admin_profile(&mut self, profile: AdminProfile) -> Result<()> {
        self.require_admin()?;
        if profile.name.trim().is_empty() {
            return Err(StudyBuddyError::validation("Admin name cannot be empty"));
        }
        self.edit_content(|board| {
            board.admin_profile = profile.clone();
            Ok(())
        })?;
        tracing::info!(name = %profile.name, "admin profile updated");
        Ok(())
    }

    pub fn admin_profile(&self) -> AdminProfile {
        self.content.load().admin_profile
    }

    fn edit_content<T>(&self, mut f: impl FnMut(&mut ContentBoard) -> Result<T>) -> Result<T> {
        let mut output = None;
        self.content.update(&mut |board| {
            output = Some(f(board)?);
            Ok(())
        })?;
        output.ok_or_else(|| StudyBuddyError::internal("content mutation produced no value"))
    }
}

//! Peripheral content published by the administrator.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyBuddyError};

/// Maximum number of notices kept on the board.
pub const MAX_NOTICES: usize = 3;

/// Banner sizes offered in the admin panel.
pub const STANDARD_BANNER_SIZES: [&str; 7] = [
    "728 x 90 px",
    "300 x 250 px",
    "336 x 280 px",
    "160 x 600 px",
    "300 x 600 px",
    "320 x 50 px",
    "320 x 100 px",
];

static BANNER_SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*x\s*(\d+)").expect("banner size pattern is valid"));

/// Administrator's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Default for AdminProfile {
    fn default() -> Self {
        Self {
            name: "StudyBuddy Admin".to_string(),
            email: "admin@studybuddy.local".to_string(),
            photo_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: String,
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyLink {
    pub id: String,
    pub title: String,
    pub url: String,
    pub date: NaiveDate,
}

/// One line in the help-line chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpMessage {
    pub id: String,
    /// Learner thread this message belongs to.
    pub user_id: String,
    pub user_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_admin: bool,
}

/// Announcement shown on the home screen. Only one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminPost {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub posted_at: DateTime<Utc>,
}

/// Banner dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerSize {
    pub width: u32,
    pub height: u32,
}

impl Default for BannerSize {
    fn default() -> Self {
        Self {
            width: 728,
            height: 90,
        }
    }
}

impl BannerSize {
    /// Parses descriptors like `"300 x 250 px"`. Anything else is 728x90.
    pub fn parse(descriptor: &str) -> Self {
        BANNER_SIZE_PATTERN
            .captures(descriptor)
            .and_then(|caps| {
                let width = caps.get(1)?.as_str().parse().ok()?;
                let height = caps.get(2)?.as_str().parse().ok()?;
                Some(Self { width, height })
            })
            .unwrap_or_default()
    }

    /// Tall banners are width-limited on the home screen.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    pub fn descriptor(&self) -> String {
        format!("{} x {} px", self.width, self.height)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeBanner {
    /// Image data URL; `None` shows the default creator card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub size: BannerSize,
}

/// Everything the admin publishes, persisted as one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBoard {
    #[serde(default)]
    pub admin_profile: AdminProfile,
    /// Newest first.
    #[serde(default)]
    pub notices: Vec<Notice>,
    #[serde(default)]
    pub study_links: Vec<StudyLink>,
    #[serde(default)]
    pub help_messages: Vec<HelpMessage>,
    #[serde(default)]
    pub post: Option<AdminPost>,
    #[serde(default)]
    pub banner: HomeBanner,
}

impl ContentBoard {
    /// Puts a notice on top of the board, evicting the oldest beyond the limit.
    pub fn post_notice(&mut self, text: &str, now: DateTime<Utc>) -> Result<Notice> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StudyBuddyError::validation("Notice text cannot be empty"));
        }
        let notice = Notice {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            posted_at: now,
        };
        self.notices.insert(0, notice.clone());
        self.notices.truncate(MAX_NOTICES);
        Ok(notice)
    }

    pub fn clear_notices(&mut self) {
        self.notices.clear();
    }

    pub fn add_study_link(&mut self, title: &str, url: &str, today: NaiveDate) -> Result<StudyLink> {
        if title.trim().is_empty() || url.trim().is_empty() {
            return Err(StudyBuddyError::validation(
                "Link title and URL are both required",
            ));
        }
        let link = StudyLink {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            url: url.trim().to_string(),
            date: today,
        };
        self.study_links.push(link.clone());
        Ok(link)
    }

    pub fn delete_study_link(&mut self, id: &str) -> Result<()> {
        let before = self.study_links.len();
        self.study_links.retain(|l| l.id != id);
        if self.study_links.len() == before {
            return Err(StudyBuddyError::not_found("study_link", id));
        }
        Ok(())
    }

    pub fn add_help_message(
        &mut self,
        user_id: &str,
        user_name: &str,
        text: &str,
        is_admin: bool,
        now: DateTime<Utc>,
    ) -> Result<HelpMessage> {
        if text.trim().is_empty() {
            return Err(StudyBuddyError::validation("Message cannot be empty"));
        }
        let message = HelpMessage {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            text: text.trim().to_string(),
            timestamp: now,
            is_admin,
        };
        self.help_messages.push(message.clone());
        Ok(message)
    }

    /// Messages visible to a viewer: all of them for the admin, one thread
    /// for a learner.
    pub fn help_thread(&self, viewer_id: Option<&str>, is_admin: bool) -> Vec<HelpMessage> {
        self.help_messages
            .iter()
            .filter(|m| is_admin || Some(m.user_id.as_str()) == viewer_id)
            .cloned()
            .collect()
    }

    pub fn publish_post(&mut self, text: &str, image: Option<String>, now: DateTime<Utc>) -> Result<()> {
        if text.trim().is_empty() && image.is_none() {
            return Err(StudyBuddyError::validation(
                "Announcement needs text or an image",
            ));
        }
        self.post = Some(AdminPost {
            text: text.trim().to_string(),
            image,
            posted_at: now,
        });
        Ok(())
    }
}

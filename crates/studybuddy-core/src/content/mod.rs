//! Notices, study links, help-line messages, banner and announcement.

mod model;
mod repository;

pub use model::{
    AdminPost, AdminProfile, BannerSize, ContentBoard, HelpMessage, HomeBanner, MAX_NOTICES,
    Notice, STANDARD_BANNER_SIZES, StudyLink,
};
pub use repository::{ContentMutation, ContentRepository};

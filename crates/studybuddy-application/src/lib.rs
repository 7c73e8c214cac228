//! Application layer: the StudyBuddy controller and tutor panels.

pub mod app;
pub mod friend_chat;
pub mod tutor_panel;

pub use app::{DailyGoalStatus, GoalCheck, StudyBuddyApp};
pub use friend_chat::FriendChat;
pub use tutor_panel::TutorPanel;

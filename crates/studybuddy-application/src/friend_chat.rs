//! Multi-turn English practice with the AI friend.

use studybuddy_core::tutor::{ChatRole, ChatTurn, EMPTY_REPLY_FALLBACK, TaskOutcome, TutorTask};

use crate::tutor_panel::TutorPanel;

pub const OPENING_LINE: &str = "আসসালামু আলাইকুম! Hello! I am your AI Study Friend. Let's practice English together! (চলো একসাথে ইংরেজি প্র্যাকটিস করি!)";
pub const EMPTY_FRIEND_REPLY: &str = "I see! Tell me more.";
pub const CONFUSED_FRIEND_REPLY: &str = "I am a bit confused. Can you say that again?";

/// Conversation log for one friend chat.
///
/// The whole log is resent on every turn. A failed turn keeps the learner's
/// message and answers it with a stock line so the log stays alternating.
#[derive(Debug, Clone)]
pub struct FriendChat {
    log: Vec<ChatTurn>,
}

impl Default for FriendChat {
    fn default() -> Self {
        Self::new()
    }
}

impl FriendChat {
    pub fn new() -> Self {
        Self {
            log: vec![ChatTurn::model(OPENING_LINE)],
        }
    }

    pub fn log(&self) -> &[ChatTurn] {
        &self.log
    }

    /// Number of learner turns so far.
    pub fn turns(&self) -> usize {
        self.log.iter().filter(|t| t.role == ChatRole::User).count()
    }

    pub async fn send(&mut self, panel: &TutorPanel, message: &str) -> TaskOutcome<String> {
        let message = message.trim();
        let task = TutorTask::FriendChat {
            history: self.log.clone(),
            message: message.to_string(),
        };
        if task.is_blank() {
            return TaskOutcome::Ignored;
        }

        self.log.push(ChatTurn::user(message));
        match panel.run(task).await {
            TaskOutcome::Completed(reply) => {
                let text = match reply.text() {
                    "" | EMPTY_REPLY_FALLBACK => EMPTY_FRIEND_REPLY.to_string(),
                    text => text.to_string(),
                };
                self.log.push(ChatTurn::model(text.clone()));
                TaskOutcome::Completed(text)
            }
            TaskOutcome::Failed { .. } => {
                self.log.push(ChatTurn::model(CONFUSED_FRIEND_REPLY));
                TaskOutcome::Failed {
                    fallback: CONFUSED_FRIEND_REPLY.to_string(),
                }
            }
            // Nothing was sent; drop the learner's line again.
            TaskOutcome::Busy => {
                self.log.pop();
                TaskOutcome::Busy
            }
            TaskOutcome::Ignored => {
                self.log.pop();
                TaskOutcome::Ignored
            }
        }
    }
}

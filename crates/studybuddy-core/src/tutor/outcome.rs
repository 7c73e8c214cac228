use super::reply::TutorReply;

/// Shown when the agent call fails for any reason.
pub const FAILURE_FALLBACK: &str = "একটি সমস্যা হয়েছে। আবার চেষ্টা করো।";

/// Shown when the agent answered with nothing.
pub const EMPTY_REPLY_FALLBACK: &str = "দুঃখিত, কোনো উত্তর পাওয়া যায়নি।";

/// What a tutor submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<T = TutorReply> {
    Completed(T),
    /// A request was already in flight; nothing was sent.
    Busy,
    /// Blank input; nothing was sent.
    Ignored,
    Failed { fallback: String },
}

impl<T> TaskOutcome<T> {
    pub fn failed() -> Self {
        TaskOutcome::Failed {
            fallback: FAILURE_FALLBACK.to_string(),
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            TaskOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, TaskOutcome::Busy)
    }
}

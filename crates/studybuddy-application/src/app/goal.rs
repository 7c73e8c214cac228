use studybuddy_core::error::{Result, StudyBuddyError};
use studybuddy_core::goal::GoalProgress;
use studybuddy_core::tutor::{TaskOutcome, TutorReply, TutorTask};

use super::StudyBuddyApp;
use crate::tutor_panel::TutorPanel;

/// Today's daily goal counter for the active learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyGoalStatus {
    pub count: u32,
    pub ceiling: u32,
    pub remaining: u32,
}

/// Verdict on a submitted daily goal sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalCheck {
    Accepted {
        progress: GoalProgress,
        feedback: String,
    },
    Rejected {
        feedback: String,
    },
}

impl StudyBuddyApp {
    pub fn goal_status(&self) -> Result<DailyGoalStatus> {
        let mut record = self.require_user()?.clone();
        self.goal.touch(&mut record, self.clock.today());
        let ceiling = self.goal.ceiling;
        let count = record.daily_challenge_count.min(ceiling);
        Ok(DailyGoalStatus {
            count,
            ceiling,
            remaining: ceiling - count,
        })
    }

    /// Records one daily goal success for the active learner.
    pub fn record_goal_success(&mut self) -> Result<GoalProgress> {
        let goal = self.goal;
        let today = self.clock.today();
        let now = self.clock.now();

        let progress = self.mutate_active(|record| goal.record_success(record, today, now))?;
        tracing::info!(
            count = progress.count,
            ceiling = progress.ceiling,
            points = progress.points_awarded,
            "daily goal success recorded"
        );
        Ok(progress)
    }

    /// Sends `sentence` for checking and records a success when it passes.
    ///
    /// Fails with `GoalLimitReached` before contacting the tutor when the
    /// learner has no attempts left today.
    pub async fn check_goal_sentence(
        &mut self,
        panel: &TutorPanel,
        sentence: &str,
    ) -> Result<TaskOutcome<GoalCheck>> {
        let user = self.require_user()?;
        if !self.goal.can_attempt(user, self.clock.today()) {
            return Err(StudyBuddyError::GoalLimitReached {
                ceiling: self.goal.ceiling,
            });
        }

        let task = TutorTask::GoalCheck {
            sentence: sentence.to_string(),
        };
        let verdict = match panel.run(task).await {
            TaskOutcome::Completed(reply) => reply,
            TaskOutcome::Busy => return Ok(TaskOutcome::Busy),
            TaskOutcome::Ignored => return Ok(TaskOutcome::Ignored),
            TaskOutcome::Failed { fallback } => return Ok(TaskOutcome::Failed { fallback }),
        };

        let check = match verdict {
            TutorReply::GoalVerdict {
                accepted: true,
                feedback,
            } => GoalCheck::Accepted {
                progress: self.record_goal_success()?,
                feedback,
            },
            other => GoalCheck::Rejected {
                feedback: other.text().to_string(),
            },
        };
        Ok(TaskOutcome::Completed(check))
    }
}

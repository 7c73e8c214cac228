//! Daily goal counter.
//!
//! Each learner may complete at most `ceiling` reward-eligible sentences per
//! calendar day. The counter is keyed by `UserRecord::last_challenge_date`
//! and reset lazily: the first time a record is looked at on a new day its
//! count drops to zero before anything else is evaluated.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyBuddyError};
use crate::user::UserRecord;

/// Default number of successes allowed per day.
pub const DEFAULT_CEILING: u32 = 3;

/// Points awarded per success under the incremental policy.
pub const DEFAULT_POINTS_PER_SUCCESS: u64 = 10;

/// How completing daily goals turns into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardPolicy {
    /// `per_success` points for every recorded success.
    Incremental { per_success: u64 },
    /// `bonus` points once, when the counter reaches the ceiling.
    LumpSum { bonus: u64 },
}

impl Default for RewardPolicy {
    fn default() -> Self {
        RewardPolicy::Incremental {
            per_success: DEFAULT_POINTS_PER_SUCCESS,
        }
    }
}

/// Result of one recorded success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    pub count: u32,
    pub ceiling: u32,
    pub points_awarded: u64,
    pub completed: bool,
}

impl GoalProgress {
    pub fn remaining(&self) -> u32 {
        self.ceiling.saturating_sub(self.count)
    }
}

/// Daily goal rules: a ceiling and a reward policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoal {
    pub ceiling: u32,
    pub reward: RewardPolicy,
}

impl Default for DailyGoal {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            reward: RewardPolicy::default(),
        }
    }
}

impl DailyGoal {
    pub fn new(ceiling: u32, reward: RewardPolicy) -> Self {
        Self { ceiling, reward }
    }

    /// Applies the new-day reset. Returns true when the record changed.
    pub fn touch(&self, record: &mut UserRecord, today: NaiveDate) -> bool {
        if record.last_challenge_date == today {
            return false;
        }
        record.daily_challenge_count = 0;
        record.last_challenge_date = today;
        true
    }

    /// Whether another success can be recorded today.
    ///
    /// Evaluated on a copy so that the check never mutates the caller's record.
    pub fn can_attempt(&self, record: &UserRecord, today: NaiveDate) -> bool {
        let mut probe = record.clone();
        self.touch(&mut probe, today);
        probe.daily_challenge_count < self.ceiling
    }

    /// Records one success for `record` on `today`.
    ///
    /// The reset is applied first; a record already at the ceiling is left
    /// untouched and `GoalLimitReached` is returned.
    pub fn record_success(
        &self,
        record: &mut UserRecord,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<GoalProgress> {
        self.touch(record, today);

        if record.daily_challenge_count >= self.ceiling {
            return Err(StudyBuddyError::GoalLimitReached {
                ceiling: self.ceiling,
            });
        }

        record.daily_challenge_count += 1;
        let completed = record.daily_challenge_count == self.ceiling;

        let points_awarded = match self.reward {
            RewardPolicy::Incremental { per_success } => per_success,
            RewardPolicy::LumpSum { bonus } if completed => bonus,
            RewardPolicy::LumpSum { .. } => 0,
        };
        record.points = record.points.saturating_add(points_awarded);

        update_streak(record, today);
        record.touch(now);

        Ok(GoalProgress {
            count: record.daily_challenge_count,
            ceiling: self.ceiling,
            points_awarded,
            completed,
        })
    }
}

/// Streak counts consecutive days with a success.
fn update_streak(record: &mut UserRecord, today: NaiveDate) {
    match record.last_success_date {
        Some(last) if last == today => {}
        Some(last) if last.succ_opt() == Some(today) => record.streak += 1,
        _ => record.streak = 1,
    }
    record.last_success_date = Some(today);
}

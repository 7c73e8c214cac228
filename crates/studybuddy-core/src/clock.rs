//! Calendar source for day-keyed state.
//!
//! "Today" is the local device date. Users near a timezone boundary can see
//! the daily goal reset at a different instant than their peers; that is
//! accepted.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Supplies the current date and instant.
pub trait Clock: Send + Sync {
    /// Today's calendar date in local device time.
    fn today(&self) -> NaiveDate;

    /// The current instant, used for `updated_at` stamps and message times.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a settable date. Used by tests and by replay tools.
#[derive(Debug)]
pub struct FixedClock {
    today: std::sync::Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: std::sync::Mutex::new(today),
        }
    }

    /// Moves the clock to another date.
    pub fn set_today(&self, today: NaiveDate) {
        if let Ok(mut guard) = self.today.lock() {
            *guard = today;
        }
    }

    /// Advances the clock by whole days.
    pub fn advance_days(&self, days: u64) {
        if let Ok(mut guard) = self.today.lock() {
            if let Some(next) = guard.checked_add_days(chrono::Days::new(days)) {
                *guard = next;
            }
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
            .lock()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }

    fn now(&self) -> DateTime<Utc> {
        let date = self.today();
        date.and_hms_opt(12, 0, 0)
            .map(|naive| naive.and_utc())
            .unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let clock = FixedClock::new(start);
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        assert_eq!(clock.now().date_naive(), clock.today());
    }
}

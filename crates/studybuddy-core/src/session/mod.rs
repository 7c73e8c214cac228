//! Active session and reconciliation rules.
//!
//! The active session is a by-value copy of one `UserRecord`. It is never a
//! source of truth: after every store change the copy is re-derived from the
//! store by id. A record that disappeared or became blocked ends the session.

use chrono::NaiveDate;

use crate::goal::DailyGoal;
use crate::user::UserRecord;

/// Outcome of re-deriving the active session from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nobody was signed in.
    NoSession,
    /// The record still exists and is usable; the session adopts this copy.
    Refreshed(UserRecord),
    /// The record was deleted. The session must be cleared.
    Removed { id: String },
    /// The record was blocked. The session must be cleared.
    Blocked { id: String, username: String },
}

impl Reconciliation {
    /// True when the session has to be cleared.
    pub fn ends_session(&self) -> bool {
        matches!(self, Reconciliation::Removed { .. } | Reconciliation::Blocked { .. })
    }
}

/// At most one signed-in learner per running client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSession {
    user: Option<UserRecord>,
}

impl ActiveSession {
    pub fn empty() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: UserRecord) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_none()
    }

    pub fn clear(&mut self) {
        self.user = None;
    }

    /// Re-derives the session from `store` and applies the outcome.
    pub fn reconcile(&mut self, store: &[UserRecord]) -> Reconciliation {
        let Some(active_id) = self.user_id().map(str::to_string) else {
            return Reconciliation::NoSession;
        };

        let outcome = reconcile(&active_id, store);
        match &outcome {
            Reconciliation::Refreshed(record) => self.user = Some(record.clone()),
            Reconciliation::Removed { .. } | Reconciliation::Blocked { .. } => self.user = None,
            Reconciliation::NoSession => {}
        }
        outcome
    }
}

/// Locates `active_id` in `store` and classifies the result.
pub fn reconcile(active_id: &str, store: &[UserRecord]) -> Reconciliation {
    match store.iter().find(|u| u.id == active_id) {
        None => Reconciliation::Removed {
            id: active_id.to_string(),
        },
        Some(record) if record.blocked => Reconciliation::Blocked {
            id: record.id.clone(),
            username: record.username.clone(),
        },
        Some(record) => Reconciliation::Refreshed(record.clone()),
    }
}

/// Establishes the session at process start.
///
/// The daily reset is applied to the returned copy only; it reaches the store
/// with the next write for this learner.
pub fn resolve_at_startup(
    remembered_id: Option<&str>,
    store: &[UserRecord],
    goal: &DailyGoal,
    today: NaiveDate,
) -> Option<UserRecord> {
    let id = remembered_id?;
    let record = store.iter().find(|u| u.id == id)?;
    if record.blocked {
        return None;
    }
    let mut record = record.clone();
    goal.touch(&mut record, today);
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Credential;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn user(name: &str) -> UserRecord {
        UserRecord::new(name, Credential::Argon2("h".into()), day(15), Utc::now())
    }

    #[test]
    fn test_resolve_applies_reset_to_copy_only() {
        let mut alice = user("alice");
        alice.daily_challenge_count = 2;
        let store = vec![alice.clone()];

        let resolved =
            resolve_at_startup(Some(&alice.id), &store, &DailyGoal::default(), day(16)).unwrap();

        assert_eq!(resolved.daily_challenge_count, 0);
        assert_eq!(resolved.last_challenge_date, day(16));
        assert_eq!(store[0].daily_challenge_count, 2);
    }

    #[test]
    fn test_resolve_same_day_keeps_count() {
        let mut bob = user("bob");
        bob.daily_challenge_count = 2;
        let store = vec![bob.clone()];

        let resolved =
            resolve_at_startup(Some(&bob.id), &store, &DailyGoal::default(), day(15)).unwrap();
        assert_eq!(resolved.daily_challenge_count, 2);
    }

    #[test]
    fn test_resolve_unknown_or_blocked_is_empty() {
        let mut carol = user("carol");
        let goal = DailyGoal::default();
        assert!(resolve_at_startup(Some("missing"), &[carol.clone()], &goal, day(15)).is_none());
        assert!(resolve_at_startup(None, &[carol.clone()], &goal, day(15)).is_none());

        carol.blocked = true;
        assert!(resolve_at_startup(Some(&carol.id), &[carol.clone()], &goal, day(15)).is_none());
    }

    #[test]
    fn test_reconcile_outcomes() {
        let alice = user("alice");
        let mut session = ActiveSession::signed_in(alice.clone());

        let mut edited = alice.clone();
        edited.points = 40;
        let outcome = session.reconcile(&[edited.clone()]);
        assert_eq!(outcome, Reconciliation::Refreshed(edited));
        assert_eq!(session.user().unwrap().points, 40);

        let mut blocked = alice.clone();
        blocked.blocked = true;
        let outcome = session.reconcile(&[blocked]);
        assert!(outcome.ends_session());
        assert!(session.is_empty());
    }

    #[test]
    fn test_reconcile_removed() {
        let alice = user("alice");
        let bob = user("bob");
        let mut session = ActiveSession::signed_in(alice.clone());

        let outcome = session.reconcile(&[bob]);
        assert_eq!(outcome, Reconciliation::Removed { id: alice.id });
        assert!(session.is_empty());
        assert_eq!(session.reconcile(&[]), Reconciliation::NoSession);
    }
}

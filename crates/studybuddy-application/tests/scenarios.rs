mod common;

use common::{Fixture, TestHasher, day};
use std::sync::Arc;
use studybuddy_core::config::RootConfig;
use studybuddy_core::goal::RewardPolicy;
use studybuddy_core::session::Reconciliation;
use studybuddy_core::user::ProfileRepository;
use studybuddy_core::StudyBuddyError;
use studybuddy_infrastructure::JsonProfileRepository;

fn store(fixture: &Fixture) -> JsonProfileRepository {
    JsonProfileRepository::with_path(fixture.path().join("users.json"))
}

#[test]
fn scenario_a_incremental_reward() {
    let fixture = Fixture::new();
    let mut app = fixture.open();

    let alice = app.register("alice", "secret1", None).unwrap();
    assert_eq!(alice.points, 0);
    assert_eq!(alice.daily_challenge_count, 0);

    for _ in 0..3 {
        app.record_goal_success().unwrap();
    }

    let stored = store(&fixture).find_by_id(&alice.id).unwrap();
    assert_eq!(stored.daily_challenge_count, 3);
    assert_eq!(stored.points, 30);
    assert_eq!(app.current_user().unwrap().points, 30);

    let err = app.record_goal_success().unwrap_err();
    assert!(matches!(err, StudyBuddyError::GoalLimitReached { ceiling: 3 }));
    assert_eq!(store(&fixture).find_by_id(&alice.id).unwrap().points, 30);
    assert_eq!(app.goal_status().unwrap().remaining, 0);
}

#[test]
fn scenario_a_lump_sum_reward() {
    let mut config = RootConfig::default();
    config.goal.reward = RewardPolicy::LumpSum { bonus: 50 };
    let fixture = Fixture::with_config(config);
    let mut app = fixture.open();

    app.register("alice", "secret1", None).unwrap();
    let awarded: Vec<u64> = (0..3)
        .map(|_| app.record_goal_success().unwrap().points_awarded)
        .collect();

    assert_eq!(awarded, vec![0, 0, 50]);
    let user = app.current_user().unwrap();
    assert_eq!(user.points, 50);
    assert_eq!(user.daily_challenge_count, 3);
}

#[test]
fn scenario_b_block_ends_active_session() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    let alice = app.register("alice", "secret1", None).unwrap();
    app.unlock_admin(common::ADMIN_ID, common::ADMIN_SECRET).unwrap();

    let outcome = app.block(&alice.id).unwrap();
    assert!(matches!(outcome, Reconciliation::Blocked { ref id, .. } if id == &alice.id));
    assert!(app.current_user().is_none());

    // Blocking keeps the record and its credentials.
    let found = store(&fixture)
        .find_by_credentials("alice", "secret1", &TestHasher)
        .unwrap()
        .unwrap();
    assert!(found.blocked);

    let err = app.login("alice", "secret1").unwrap_err();
    assert!(err.is_blocked());
    assert!(app.current_user().is_none());

    // A restarted client does not restore the blocked learner either.
    assert!(fixture.open().current_user().is_none());
}

#[test]
fn scenario_b_block_from_another_client() {
    let fixture = Fixture::new();
    let mut learner = fixture.open();
    let alice = learner.register("alice", "secret1", None).unwrap();

    let mut admin = fixture.open_admin();
    admin.block(&alice.id).unwrap();

    // The stale session cannot write anything.
    let err = learner.record_goal_success().unwrap_err();
    assert!(err.is_blocked());
    assert!(learner.current_user().is_none());
    assert_eq!(store(&fixture).find_by_id(&alice.id).unwrap().points, 0);
}

#[test]
fn scenario_c_login_resets_only_on_new_day() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    app.register("bob", "hunter22", None).unwrap();
    app.record_goal_success().unwrap();
    app.record_goal_success().unwrap();
    app.logout().unwrap();

    let first = app.login("bob", "hunter22").unwrap();
    assert_eq!(first.daily_challenge_count, 2);
    app.logout().unwrap();
    let second = app.login("bob", "hunter22").unwrap();
    assert_eq!(second.daily_challenge_count, 2);
    app.logout().unwrap();

    fixture.clock.set_today(day(17));
    let next_day = app.login("bob", "hunter22").unwrap();
    assert_eq!(next_day.daily_challenge_count, 0);
    assert_eq!(next_day.last_challenge_date, day(17));

    let progress = app.record_goal_success().unwrap();
    assert_eq!(progress.count, 1);
    assert_eq!(app.current_user().unwrap().streak, 2);
}

#[test]
fn startup_reset_is_not_persisted() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    let bob = app.register("bob", "hunter22", None).unwrap();
    app.record_goal_success().unwrap();

    fixture.clock.set_today(day(17));
    let restarted = fixture.open();
    assert_eq!(restarted.current_user().unwrap().daily_challenge_count, 0);
    assert_eq!(restarted.goal_status().unwrap().remaining, 3);
    assert_eq!(store(&fixture).find_by_id(&bob.id).unwrap().daily_challenge_count, 1);
}

#[test]
fn duplicate_username_is_rejected_without_mutation() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    app.register("alice", "secret1", Some("Alice")).unwrap();
    let before = std::fs::read_to_string(fixture.path().join("users.json")).unwrap();

    let err = app.register("ALICE", "other-secret", None).unwrap_err();
    assert!(err.is_validation());

    let after = std::fs::read_to_string(fixture.path().join("users.json")).unwrap();
    assert_eq!(before, after);
    assert_eq!(app.current_user().unwrap().name, "Alice");
}

#[test]
fn wrong_secret_is_rejected() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    app.register("alice", "secret1", None).unwrap();
    app.logout().unwrap();

    assert!(app.login("alice", "secret2").unwrap_err().is_validation());
    assert!(app.login("nobody", "secret1").unwrap_err().is_validation());
    assert!(app.current_user().is_none());
}

#[test]
fn session_survives_restart_until_logout() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    let alice = app.register("alice", "secret1", None).unwrap();

    assert_eq!(fixture.open().current_user().unwrap().id, alice.id);
    app.logout().unwrap();
    assert!(fixture.open().current_user().is_none());
}

#[test]
fn legacy_plaintext_credential_is_upgraded_on_login() {
    let fixture = Fixture::new();
    std::fs::write(
        fixture.path().join("users.json"),
        r#"{"users":[{"id":"1700000000000","username":"rahim","password":"1234","name":"Rahim","points":40,"lastChallengeDate":"Thu Oct 15 2026","joinDate":"2026-09-01"}]}"#,
    )
    .unwrap();

    let mut app = fixture.open_with(Arc::new(TestHasher));
    let rahim = app.login("rahim", "1234").unwrap();
    assert_eq!(rahim.points, 40);
    assert!(!rahim.credential.is_legacy());

    let stored = store(&fixture).find_by_username("rahim").unwrap();
    assert!(!stored.credential.is_legacy());
    assert_eq!(stored.last_challenge_date, day(16));
    assert!(app.login("rahim", "1234").is_ok());
}

#[test]
fn profile_update_writes_through() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    let alice = app.register("alice", "secret1", None).unwrap();

    let updated = app
        .update_profile(studybuddy_core::user::ProfileUpdate {
            name: Some("Alice Rahman".into()),
            bio: Some("Class 9".into()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(updated.name, "Alice Rahman");
    assert_eq!(store(&fixture).find_by_id(&alice.id).unwrap().bio, "Class 9");

    let blank = studybuddy_core::user::ProfileUpdate {
        name: Some(" ".into()),
        ..Default::default()
    };
    assert!(app.update_profile(blank).unwrap_err().is_validation());
    assert_eq!(app.current_user().unwrap().name, "Alice Rahman");
}

#[test]
fn level_stats_follow_points() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    assert!(app.level_stats().is_none());

    app.register("alice", "secret1", None).unwrap();
    app.record_goal_success().unwrap();
    let stats = app.level_stats().unwrap();
    assert_eq!(stats.level, 1);
    assert!((stats.progress - 10.0).abs() < 1e-9);
}

mod common;

use common::{ADMIN_ID, ADMIN_SECRET, Fixture};
use studybuddy_core::content::AdminProfile;
use studybuddy_core::session::Reconciliation;

#[test]
fn admin_gate_guards_moderation() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    let alice = app.register("alice", "secret1", None).unwrap();

    assert!(app.block(&alice.id).unwrap_err().is_security());
    assert!(app.list_users().unwrap_err().is_security());
    assert!(app.unlock_admin(ADMIN_ID, "wrong").unwrap_err().is_security());
    assert!(!app.is_admin());

    app.unlock_admin(&format!("  {ADMIN_ID} "), ADMIN_SECRET).unwrap();
    assert!(app.is_admin());
    assert_eq!(app.list_users().unwrap().len(), 1);

    app.lock_admin().unwrap();
    assert!(app.delete_user(&alice.id).unwrap_err().is_security());
}

#[test]
fn unknown_user_is_not_found() {
    let fixture = Fixture::new();
    let mut app = fixture.open_admin();

    assert!(app.block("missing").unwrap_err().is_not_found());
    assert!(app.unblock("missing").unwrap_err().is_not_found());
    assert!(app.reset_password("missing", "newpass").unwrap_err().is_not_found());
    assert!(app.delete_user("missing").unwrap_err().is_not_found());
}

#[test]
fn unblock_allows_login_again() {
    let fixture = Fixture::new();
    let mut app = fixture.open_admin();
    let alice = app.register("alice", "secret1", None).unwrap();

    app.block(&alice.id).unwrap();
    assert!(app.login("alice", "secret1").unwrap_err().is_blocked());

    app.unblock(&alice.id).unwrap();
    assert_eq!(app.login("alice", "secret1").unwrap().id, alice.id);
}

#[test]
fn reset_password_keeps_session() {
    let fixture = Fixture::new();
    let mut app = fixture.open_admin();
    let alice = app.register("alice", "secret1", None).unwrap();

    let outcome = app.reset_password(&alice.id, "fresh-secret").unwrap();
    assert!(matches!(outcome, Reconciliation::Refreshed(_)));
    assert_eq!(app.current_user().unwrap().id, alice.id);
    assert!(app.reset_password(&alice.id, "abc").unwrap_err().is_validation());

    app.logout().unwrap();
    assert!(app.login("alice", "secret1").unwrap_err().is_validation());
    assert!(app.login("alice", "fresh-secret").is_ok());
}

#[test]
fn deleting_active_user_ends_session() {
    let fixture = Fixture::new();
    let mut app = fixture.open_admin();
    let alice = app.register("alice", "secret1", None).unwrap();

    let outcome = app.delete_user(&alice.id).unwrap();
    assert_eq!(outcome, Reconciliation::Removed { id: alice.id });
    assert!(app.current_user().is_none());
    assert!(app.list_users().unwrap().is_empty());
    assert!(fixture.open().current_user().is_none());
}

#[test]
fn deleting_another_user_keeps_session() {
    let fixture = Fixture::new();
    let mut app = fixture.open_admin();
    let bob = app.register("bob", "hunter22", None).unwrap();
    let alice = app.register("alice", "secret1", None).unwrap();

    let outcome = app.delete_user(&bob.id).unwrap();
    assert!(matches!(outcome, Reconciliation::Refreshed(ref user) if user.id == alice.id));
    assert_eq!(app.current_user().unwrap().id, alice.id);
    assert_eq!(app.list_users().unwrap().len(), 1);
}

#[test]
fn refresh_picks_up_remote_deletion() {
    let fixture = Fixture::new();
    let mut learner = fixture.open();
    let alice = learner.register("alice", "secret1", None).unwrap();

    let mut admin = fixture.open_admin();
    admin.delete_user(&alice.id).unwrap();

    assert!(learner.refresh().unwrap().ends_session());
    assert!(learner.current_user().is_none());
}

#[test]
fn help_line_threads() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    let alice = app.register("alice", "secret1", None).unwrap();
    app.send_help_message("আমার পাসওয়ার্ড ভুলে গেছি").unwrap();
    assert!(app.send_help_message("  ").unwrap_err().is_validation());

    let bob = app.register("bob", "hunter22", None).unwrap();
    app.send_help_message("hello").unwrap();
    assert_eq!(app.help_thread().len(), 1);
    assert!(app.reply_help_message(&alice.id, "ok").unwrap_err().is_security());

    app.unlock_admin(ADMIN_ID, ADMIN_SECRET).unwrap();
    app.update_admin_profile(AdminProfile {
        name: "Rafiq Sir".into(),
        ..AdminProfile::default()
    })
    .unwrap();
    let reply = app.reply_help_message(&alice.id, "রিসেট করে দিয়েছি").unwrap();
    assert!(reply.is_admin);
    assert_eq!(reply.user_name, "Rafiq Sir");
    assert_eq!(app.help_thread().len(), 3);

    app.lock_admin().unwrap();
    let thread = app.help_thread();
    assert!(thread.iter().all(|m| m.user_id == bob.id));
}

#[test]
fn admin_content_management() {
    let fixture = Fixture::new();
    let mut app = fixture.open();
    assert!(app.post_notice("exam on sunday").unwrap_err().is_security());

    app.unlock_admin(ADMIN_ID, ADMIN_SECRET).unwrap();
    for text in ["one", "two", "three", "four"] {
        app.post_notice(text).unwrap();
    }
    assert_eq!(app.notices().len(), 3);
    app.clear_notices().unwrap();
    assert!(app.notices().is_empty());

    let link = app.add_study_link("Physics", "https://example.com/physics").unwrap();
    assert_eq!(app.study_links().len(), 1);
    app.delete_study_link(&link.id).unwrap();
    assert!(app.delete_study_link(&link.id).unwrap_err().is_not_found());

    let size = app.set_banner_size("300 x 250 px").unwrap();
    assert_eq!((size.width, size.height), (300, 250));
    app.set_banner("data:image/png;base64,AAAA".into()).unwrap();
    assert!(app.banner().image.is_some());
    app.clear_banner().unwrap();
    assert_eq!(app.banner().size, size);
    assert!(app.banner().image.is_none());

    assert!(app.publish_post(" ", None).unwrap_err().is_validation());
    app.publish_post("Eid holiday", None).unwrap();
    assert_eq!(app.post().unwrap().text, "Eid holiday");
    app.remove_post().unwrap();
    assert!(app.post().is_none());

    // Content is shared across clients.
    app.post_notice("persisted").unwrap();
    assert_eq!(fixture.open().notices()[0].text, "persisted");
}

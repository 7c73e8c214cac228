use anyhow::Result;
use studybuddy_application::StudyBuddyApp;

use super::require_session;

pub fn send_help(app: &mut StudyBuddyApp, text: &str) -> Result<()> {
    require_session(app)?;
    app.send_help_message(text)?;
    println!("✅ Message sent to {}", app.admin_profile().name);
    Ok(())
}

pub fn show_thread(app: &StudyBuddyApp) {
    let messages = app.help_thread();
    if messages.is_empty() {
        println!("No messages yet");
        return;
    }
    for message in messages {
        let who = if message.is_admin { "🛡 " } else { "" };
        println!(
            "[{}] {}{}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            who,
            message.user_name,
            message.text
        );
    }
}

pub fn show_board(app: &StudyBuddyApp) {
    if let Some(post) = app.post() {
        println!("📣 {}", post.text);
        println!();
    }

    let notices = app.notices();
    println!("📌 Notices ({})", notices.len());
    for notice in notices {
        println!("  - {}", notice.text);
    }

    let links = app.study_links();
    println!("🔗 Study links ({})", links.len());
    for link in links {
        println!("  - {} <{}> ({})", link.title, link.url, link.date);
    }
}

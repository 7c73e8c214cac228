use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use studybuddy_application::{FriendChat, GoalCheck, StudyBuddyApp, TutorPanel};
use studybuddy_core::tutor::{
    Direction, ImageInput, Language, TaskOutcome, TutorReply, TutorTask,
};
use studybuddy_interaction::{GeminiApiAgent, load_image};

use super::require_session;

fn panel(app: &StudyBuddyApp, home: Option<&Path>) -> Result<TutorPanel> {
    require_session(app)?;
    let agent = GeminiApiAgent::from_secrets(home, app.config().gemini.clone())?;
    Ok(TutorPanel::new(Arc::new(agent)))
}

async fn optional_image(path: Option<PathBuf>) -> Result<Option<ImageInput>> {
    match path {
        Some(path) => Ok(Some(load_image(&path).await?)),
        None => Ok(None),
    }
}

/// Prints the reply and returns it when the task completed.
fn report(outcome: TaskOutcome) -> Option<TutorReply> {
    match outcome {
        TaskOutcome::Completed(reply) => {
            match &reply {
                TutorReply::Translation(guide) => {
                    println!("{}", guide.translation);
                    if !guide.pronunciation.is_empty() {
                        println!("🗣  {}", guide.pronunciation);
                    }
                }
                other => println!("{}", other.text()),
            }
            Some(reply)
        }
        TaskOutcome::Busy => {
            println!("⏳ Still working on the previous request");
            None
        }
        TaskOutcome::Ignored => {
            println!("Nothing to send");
            None
        }
        TaskOutcome::Failed { fallback } => {
            eprintln!("⚠️  {fallback}");
            None
        }
    }
}

pub async fn study(
    app: &StudyBuddyApp,
    home: Option<&Path>,
    topic: Option<String>,
    image: Option<PathBuf>,
) -> Result<()> {
    let panel = panel(app, home)?;
    let task = TutorTask::Study {
        topic: topic.unwrap_or_default(),
        image: optional_image(image).await?,
    };
    report(panel.run(task).await);
    Ok(())
}

pub async fn math(
    app: &StudyBuddyApp,
    home: Option<&Path>,
    problem: Option<String>,
    image: Option<PathBuf>,
) -> Result<()> {
    let panel = panel(app, home)?;
    let task = TutorTask::Math {
        problem: problem.unwrap_or_default(),
        image: optional_image(image).await?,
    };
    report(panel.run(task).await);
    Ok(())
}

pub async fn ask(
    app: &StudyBuddyApp,
    home: Option<&Path>,
    question: Option<String>,
    image: Option<PathBuf>,
) -> Result<()> {
    let panel = panel(app, home)?;
    let task = TutorTask::Question {
        question: question.unwrap_or_default(),
        image: optional_image(image).await?,
    };
    report(panel.run(task).await);
    Ok(())
}

pub async fn translate(
    app: &StudyBuddyApp,
    home: Option<&Path>,
    text: String,
    direction: Direction,
    speak_to: Option<PathBuf>,
) -> Result<()> {
    let panel = panel(app, home)?;
    let task = TutorTask::Translate {
        text: text.clone(),
        direction,
    };
    let reply = report(panel.run(task).await);

    if let (Some(TutorReply::Translation(guide)), Some(out)) = (reply, speak_to) {
        let spoken = guide.speakable(direction, &text).to_string();
        write_speech(&panel, &spoken, &out).await?;
    }
    Ok(())
}

pub async fn spell(
    app: &StudyBuddyApp,
    home: Option<&Path>,
    text: String,
    language: Language,
) -> Result<()> {
    let panel = panel(app, home)?;
    report(panel.run(TutorTask::Spelling { text, language }).await);
    Ok(())
}

pub async fn script(
    app: &StudyBuddyApp,
    home: Option<&Path>,
    topic: String,
    language: Language,
) -> Result<()> {
    let panel = panel(app, home)?;
    report(panel.run(TutorTask::Script { topic, language }).await);
    Ok(())
}

pub async fn check_goal(app: &mut StudyBuddyApp, home: Option<&Path>, sentence: &str) -> Result<()> {
    let panel = panel(app, home)?;
    match app.check_goal_sentence(&panel, sentence).await? {
        TaskOutcome::Completed(GoalCheck::Accepted { progress, .. }) => {
            println!(
                "🎉 Correct! +{} points · {}/{} today",
                progress.points_awarded, progress.count, progress.ceiling
            );
            if progress.completed {
                println!("🏆 Daily goal complete!");
            }
        }
        TaskOutcome::Completed(GoalCheck::Rejected { feedback }) => println!("✏️  {feedback}"),
        TaskOutcome::Busy => println!("⏳ Still checking the previous sentence"),
        TaskOutcome::Ignored => println!("Write a sentence first"),
        TaskOutcome::Failed { fallback } => eprintln!("⚠️  {fallback}"),
    }
    Ok(())
}

/// Interactive friend chat. An empty line or `exit` ends it.
pub async fn chat(app: &StudyBuddyApp, home: Option<&Path>) -> Result<()> {
    let panel = panel(app, home)?;
    let mut conversation = FriendChat::new();
    if let Some(opening) = conversation.log().first() {
        println!("🤖 {}", opening.text);
    }

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("exit") {
            break;
        }

        match conversation.send(&panel, line).await {
            TaskOutcome::Completed(text) => println!("🤖 {text}"),
            TaskOutcome::Failed { fallback } => println!("🤖 {fallback}"),
            TaskOutcome::Busy | TaskOutcome::Ignored => {}
        }
    }
    Ok(())
}

pub async fn speak(app: &StudyBuddyApp, home: Option<&Path>, text: &str, out: &Path) -> Result<()> {
    let panel = panel(app, home)?;
    write_speech(&panel, text, out).await
}

async fn write_speech(panel: &TutorPanel, text: &str, out: &Path) -> Result<()> {
    match panel.speak(text).await {
        TaskOutcome::Completed(clip) => {
            std::fs::write(out, clip.to_pcm_bytes())
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "🔊 Wrote {:.1}s of audio to {} ({} Hz, 16-bit mono PCM)",
                clip.duration_secs(),
                out.display(),
                clip.sample_rate
            );
        }
        TaskOutcome::Failed { fallback } => eprintln!("⚠️  {fallback}"),
        TaskOutcome::Busy | TaskOutcome::Ignored => {}
    }
    Ok(())
}

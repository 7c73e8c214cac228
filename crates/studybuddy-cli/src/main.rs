use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use studybuddy_application::StudyBuddyApp;
use studybuddy_core::tutor::{Direction, Language};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "studybuddy")]
#[command(about = "StudyBuddy - AI study companion for Bengali learners", long_about = None)]
struct Cli {
    /// Data directory (overrides STUDYBUDDY_HOME)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register {
        username: String,
        #[arg(long)]
        password: String,
        /// Display name (defaults to the username)
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign in
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in learner, level and daily goal
    Whoami,
    /// Edit your profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// Image file for the profile photo
        #[arg(long, conflicts_with = "remove_photo")]
        photo: Option<PathBuf>,
        #[arg(long)]
        remove_photo: bool,
    },
    /// Daily goal sentence practice
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },
    /// Explain a topic (or a photo of a textbook page)
    Study {
        topic: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Solve a math problem step by step
    Math {
        problem: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Translate with a pronunciation guide
    Translate {
        text: String,
        #[arg(long, default_value = "bn-en")]
        direction: Direction,
        /// Write the English side as raw 16-bit PCM to this file
        #[arg(long)]
        speak: Option<PathBuf>,
    },
    /// Correct spelling and grammar
    Spell {
        text: String,
        #[arg(long, default_value = "bn")]
        language: Language,
    },
    /// Ask any question
    Ask {
        question: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Write a speech, video script or short play
    Script {
        topic: String,
        #[arg(long, default_value = "bn")]
        language: Language,
    },
    /// Practice English with the AI friend (reads lines from stdin)
    Chat,
    /// Synthesize speech as raw 16-bit PCM (24 kHz mono)
    Speak {
        text: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Help line with the administrator
    Help {
        #[command(subcommand)]
        action: HelpAction,
    },
    /// Notices, study links and the current announcement
    Board,
    /// Administrator actions
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
    /// Configuration and API key
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum GoalAction {
    /// Show today's progress
    Status,
    /// Submit an English sentence for checking
    Check { sentence: String },
}

#[derive(Subcommand)]
enum HelpAction {
    /// Send a message to the administrator
    Send { text: String },
    /// Show your thread (all threads when the admin panel is unlocked)
    Thread,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config.toml if none exists
    Init,
    /// Store the Gemini API key in secret.json
    SetApiKey { key: String },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studybuddy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let home = cli.home.as_deref();

    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Init => commands::config::init(home),
            ConfigAction::SetApiKey { key } => commands::config::set_api_key(home, key),
        };
    }

    let mut app = StudyBuddyApp::open(home)?;
    app.refresh()?;
    tracing::debug!(
        signed_in = app.current_user().map(|u| u.username.as_str()),
        admin = app.is_admin(),
        "stores opened"
    );

    match cli.command {
        Commands::Register {
            username,
            password,
            name,
        } => commands::account::register(&mut app, &username, &password, name.as_deref())?,
        Commands::Login { username, password } => {
            commands::account::login(&mut app, &username, &password)?
        }
        Commands::Logout => commands::account::logout(&mut app)?,
        Commands::Whoami => commands::account::whoami(&app)?,
        Commands::Profile {
            name,
            bio,
            photo,
            remove_photo,
        } => commands::account::profile(&mut app, name, bio, photo, remove_photo).await?,
        Commands::Goal { action } => match action {
            GoalAction::Status => commands::account::goal_status(&app)?,
            GoalAction::Check { sentence } => {
                commands::tutor::check_goal(&mut app, home, &sentence).await?
            }
        },
        Commands::Study { topic, image } => {
            commands::tutor::study(&app, home, topic, image).await?
        }
        Commands::Math { problem, image } => {
            commands::tutor::math(&app, home, problem, image).await?
        }
        Commands::Translate {
            text,
            direction,
            speak,
        } => commands::tutor::translate(&app, home, text, direction, speak).await?,
        Commands::Spell { text, language } => {
            commands::tutor::spell(&app, home, text, language).await?
        }
        Commands::Ask { question, image } => {
            commands::tutor::ask(&app, home, question, image).await?
        }
        Commands::Script { topic, language } => {
            commands::tutor::script(&app, home, topic, language).await?
        }
        Commands::Chat => commands::tutor::chat(&app, home).await?,
        Commands::Speak { text, out } => commands::tutor::speak(&app, home, &text, &out).await?,
        Commands::Help { action } => match action {
            HelpAction::Send { text } => commands::content::send_help(&mut app, &text)?,
            HelpAction::Thread => commands::content::show_thread(&app),
        },
        Commands::Board => commands::content::show_board(&app),
        Commands::Admin { action } => commands::admin::run(&mut app, action).await?,
        Commands::Config { .. } => unreachable!("handled before opening the stores"),
    }

    Ok(())
}

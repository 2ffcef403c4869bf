use std::sync::Arc;

use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    Clock, DEFAULT_TIME_LIMIT_SECS, HistoryService, QuizError, QuizLoopService, QuizSettings,
};
use storage::repository::Storage;
use storage::sqlite::SqliteInitError;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use ui::vm::map_history_items;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, Error)]
enum AppError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to prepare database file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to open database: {0}")]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

#[derive(Parser, Debug)]
#[command(name = "quiz", version, about = "Two-round timed quiz with a persistent score history")]
struct Cli {
    /// SQLite URL or file path for the history log
    #[arg(
        long = "db",
        env = "QUIZ_DB_URL",
        default_value = "sqlite://quiz.sqlite3",
        global = true
    )]
    db_url: String,

    /// Seconds allowed per question
    #[arg(
        long,
        env = "QUIZ_TIME_LIMIT_SECS",
        default_value_t = DEFAULT_TIME_LIMIT_SECS,
        value_parser = clap::value_parser!(u32).range(1..),
        global = true
    )]
    time_limit: u32,

    /// Log filter used when RUST_LOG is unset, e.g. "info" or "services=debug"
    #[arg(long, env = "QUIZ_LOG", default_value = "info", global = true)]
    log: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Open the quiz window (default)
    Ui,
    /// Print every stored attempt
    History,
    /// Delete every stored attempt
    ClearHistory,
}

struct DesktopApp {
    history: Arc<HistoryService>,
    quiz_loop: Arc<QuizLoopService>,
    settings: QuizSettings,
}

impl UiApp for DesktopApp {
    fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn quiz_settings(&self) -> QuizSettings {
        self.settings
    }
}

fn init_tracing(default_filter: &str) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn normalize_sqlite_url(raw: &str) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw.to_string();
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), AppError> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || AppError::InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn open_history(db_url: &str) -> Result<HistoryService, AppError> {
    if db_url.trim().is_empty() {
        return Err(AppError::InvalidDbUrl {
            raw: db_url.to_string(),
        });
    }
    let db_url = normalize_sqlite_url(db_url);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url).await?;
    tracing::info!(db = %db_url, "history store ready");

    let history = HistoryService::new(Clock::default_clock(), storage.history);
    history.initialize().await?;
    Ok(history)
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let history = open_history(&cli.db_url).await?;

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => {
            let settings = QuizSettings::default().with_time_limit_secs(cli.time_limit);
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                history: Arc::new(history.clone()),
                quiz_loop: Arc::new(QuizLoopService::new(history)),
                settings,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz Platform")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::History => {
            let items = history.list_all().await?;
            if items.is_empty() {
                println!("No quiz history available.");
            }
            for item in map_history_items(&items) {
                println!("{}", item.label);
            }
            Ok(())
        }
        Command::ClearHistory => {
            history.clear_all().await?;
            println!("Quiz history cleared.");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_tracing(&cli.log) {
        eprintln!("{err}");
        std::process::exit(2);
    }

    if let Err(err) = run(cli).await {
        // At this layer (binary glue), printing once is fine.
        tracing::error!(error = %err, "quiz exited with an error");
        eprintln!("{err}");
        std::process::exit(2);
    }
}

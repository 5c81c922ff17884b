//! Mood Journal CLI
//!
//! Command-line front end for the mood journal:
//! - Log in or sign up
//! - Add mood entries
//! - Review entries, the co-worker insight and the trend chart

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mood_journal::config::{generate_default_config, Config, LoggingConfig};
use mood_journal::ui::{
    render_chart, render_entries_table, render_insight, render_view, sparkline,
};
use mood_journal::{
    ApiClient, ApiClientConfig, App, AppError, AuthField, AuthMode, EntryForm, FileStorage,
    MoodEntry, Refresh,
};

#[derive(Parser)]
#[command(name = "mood-journal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Digital Mood Co-Worker: track your mood and reflect on your day")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Journal API base URL (overrides config and MOOD_JOURNAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for entries (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with email and password
    Login {
        email: String,
        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        name: String,
        email: String,
        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Add a mood entry
    Add {
        /// Mood rating from 1 to 10
        mood: String,
        /// Optional note about your day
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List entries
    Entries,

    /// Show the co-worker insight
    Summary,

    /// Show the mood trend chart
    Chart {
        /// Number of most recent entries to plot
        #[arg(short, long, default_value_t = mood_journal::ui::DEFAULT_CHART_WIDTH)]
        width: usize,
    },

    /// Show the full journal screen
    Show,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

type CliApp = App<ApiClient, FileStorage>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }

    init_logging(&config.logging);

    let api = ApiClient::new(ApiClientConfig::from(&config))?;
    let storage = FileStorage::new(config.storage.storage_file());
    tracing::debug!(api_url = %config.api.url, storage = ?storage.path(), "Starting mood journal");

    let mut app = App::restore(api, storage);

    match cli.command {
        Commands::Login { email, password } => {
            let password = read_password(password)?;
            let panel = app.auth_panel_mut();
            panel.set_mode(AuthMode::Login);
            panel.set_field(AuthField::Email, email);
            panel.set_field(AuthField::Password, password);
            authenticate(&mut app).await;
        }

        Commands::Signup {
            name,
            email,
            password,
        } => {
            let password = read_password(password)?;
            let panel = app.auth_panel_mut();
            panel.set_mode(AuthMode::Signup);
            panel.set_field(AuthField::Name, name);
            panel.set_field(AuthField::Email, email);
            panel.set_field(AuthField::Password, password);
            authenticate(&mut app).await;
        }

        Commands::Logout => {
            app.logout()?;
            println!("Logged out");
        }

        Commands::Add { mood, note } => {
            require_session(&app);

            let mut form = EntryForm::new();
            form.set_mood(mood);
            if let Some(note) = note {
                form.set_note(note);
            }
            let entry = form.submit()?;
            let mood = entry.mood;

            match app.add_entry(entry).await {
                Ok(refresh) => {
                    println!("Logged mood {}/10", mood);
                    report_stale(&refresh);
                    if let Some(panel) = render_insight(&app.summary()) {
                        println!();
                        println!("{}", panel);
                    }
                }
                Err(e) => exit_with(&e, "Entry was not saved"),
            }
        }

        Commands::Entries => {
            load(&mut app).await;
            print_entries(app.entries(), &cli.format)?;
        }

        Commands::Summary => {
            load(&mut app).await;
            let summary = app.summary();
            match render_insight(&summary) {
                Some(panel) => {
                    println!("{}", panel);
                    println!("Trend: {}", sparkline(app.entries()));
                }
                None => println!("No mood entries yet. Add one with: mood-journal add 7"),
            }
        }

        Commands::Chart { width } => {
            load(&mut app).await;
            println!("{}", render_chart(app.entries(), width));
        }

        Commands::Show => {
            if let Some(refresh) = app.start().await {
                report_stale(&refresh);
            }
            println!("{}", render_view(&app.view()));
        }

        Commands::Config { output } => write_default_config(output.as_deref())?,
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("mood_journal={}", config.level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }

    Ok(())
}

fn read_password(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    print!("Password: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn authenticate(app: &mut CliApp) {
    match app.submit_auth().await {
        Ok(refresh) => {
            println!("Logged in.");
            report_stale(&refresh);
            println!();
            println!("{}", render_view(&app.view()));
        }
        Err(AppError::AuthFailed { .. }) => {
            let alert = app
                .take_alert()
                .map(|a| a.message)
                .unwrap_or_else(|| "Authentication failed".to_string());
            eprintln!("{}", alert);
            std::process::exit(1);
        }
        Err(e) => exit_with(&e, "Could not complete sign-in"),
    }
}

fn require_session(app: &CliApp) {
    if !app.session().is_authenticated() {
        eprintln!("Not logged in. Run: mood-journal login <email>");
        std::process::exit(1);
    }
}

/// Fetch entries for read commands, exiting on failure
async fn load(app: &mut CliApp) {
    require_session(app);
    if let Err(e) = app.fetch_entries().await {
        exit_with(&e, "Could not load entries");
    }
}

fn report_stale(refresh: &Refresh) {
    if let Refresh::Stale(e) = refresh {
        eprintln!("Warning: entries could not be refreshed: {}", e);
        if e.is_unauthorized() {
            eprintln!("Your session may have expired. Run: mood-journal login <email>");
        }
    }
}

fn exit_with(error: &AppError, context: &str) -> ! {
    eprintln!("{}: {}", context, error);
    if error.is_unauthorized() {
        eprintln!("Your session may have expired. Run: mood-journal login <email>");
    }
    std::process::exit(1);
}

fn print_entries(entries: &[MoodEntry], format: &str) -> anyhow::Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
        "csv" => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["date", "mood", "note"])?;
            for entry in entries {
                writer.write_record([
                    entry.date.to_rfc3339(),
                    entry.mood.to_string(),
                    entry.note.clone().unwrap_or_default(),
                ])?;
            }
            writer.flush()?;
        }
        _ => print_table(entries),
    }
    Ok(())
}

fn print_table(entries: &[MoodEntry]) {
    println!("{}", render_entries_table(entries));
}

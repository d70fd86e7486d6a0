use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use marquee_core::Database;

mod commands;
mod config;

use commands::artist::ArtistCommand;
use commands::config::ConfigCommand;
use commands::show::ShowCommand;
use commands::venue::VenueCommand;
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/marquee/marquee.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Browse and manage venues
    ///
    /// Output is JSON on stdout. `venue list` groups venues by city and
    /// state with a count of upcoming shows for each; `venue show` splits a
    /// venue's shows into past and upcoming relative to the current time.
    Venue {
        #[command(subcommand)]
        command: VenueCommand,
    },
    /// Browse and manage artists
    Artist {
        #[command(subcommand)]
        command: ArtistCommand,
    },
    /// List and book shows
    Show {
        #[command(subcommand)]
        command: ShowCommand,
    },
    /// Show store totals
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_database(path: &Path) -> Result<Database> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Database::open(path).with_context(|| format!("Failed to open database {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.db {
        Some(db_path) => Config::load_with_db_path(db_path)?,
        None => Config::load()?,
    };
    init_logging(&config.log_level);

    let now = Utc::now().naive_utc();
    let db_path = config.database_path.as_path();

    match cli.command {
        Commands::Venue { command } => {
            commands::venue::run(&mut open_database(db_path)?, command, now)?;
        }
        Commands::Artist { command } => {
            commands::artist::run(&mut open_database(db_path)?, command, now)?;
        }
        Commands::Show { command } => {
            commands::show::run(&mut open_database(db_path)?, command)?;
        }
        Commands::Status => {
            commands::status::show_status(&open_database(db_path)?, db_path, now)?;
        }
        Commands::Config { command } => {
            commands::config::run(command, &config)?;
        }
    }

    Ok(())
}

//! dbenv CLI
//!
//! Loads a `.env` file into the process environment and prints the
//! database connection variables for manual verification:
//! - Parse arguments
//! - Initialize logging (stderr only, stdout carries the report)
//! - Merge the env file without overriding variables already set
//! - Snapshot and print `DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_PORT`,
//!   `DB_NAME` and `DB_SCHEMA`

mod report;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dbenv_loader::ProcessEnv;
use dbenv_types::DbConfig;

use report::Format;

#[derive(Parser)]
#[command(name = "dbenv")]
#[command(author, version, about = "Print database settings loaded from .env", long_about = None)]
struct Cli {
    /// Env file to load instead of searching for `.env`
    #[arg(long, env = "DBENV_FILE")]
    env_file: Option<PathBuf>,

    /// Do not load any env file
    #[arg(long, env = "DBENV_NO_DOTENV")]
    no_dotenv: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // Only the main thread exists at this point, so mutating the
    // environment is sound.
    let mut env = ProcessEnv::new();
    if cli.no_dotenv {
        tracing::debug!("env file loading disabled");
    } else {
        let summary = match &cli.env_file {
            Some(path) => dbenv_loader::load(&mut env, path),
            None => dbenv_loader::load_default(&mut env),
        }
        .context("Failed to load env file")?;

        if summary.found() {
            tracing::info!(
                path = ?summary.path,
                applied = summary.applied,
                kept = summary.kept,
                skipped = summary.skipped,
                "Loaded env file"
            );
        } else {
            tracing::info!("No env file found");
        }
    }

    let config = DbConfig::from_table(&env);
    if config.is_empty() {
        tracing::warn!("None of the database variables are set");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &config, cli.format)?;

    Ok(())
}

mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use learnplan_core::config::{LearnplanConfig, expand_path};

#[derive(Parser)]
#[command(name = "learnplan")]
#[command(about = "Reschedule your learning plan and mirror it into your calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push every week from a cutoff onwards back by weeks and/or months
    Reschedule {
        /// Global week index to start shifting from ((year-2025)*52 + month*4 + week)
        #[arg(long)]
        from_week: i64,

        /// Number of weeks to push back
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        shift_weeks: i64,

        /// Number of months (30-day blocks) to push back
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        shift_months: i64,

        /// Sync the calendar after saving
        #[arg(long)]
        sync: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Schedule CSV (defaults to schedule_path in the config)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Create or update one all-day calendar event per week
    Sync {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Log in to the calendar provider
    Auth,
    /// Show each week's index, date range and sync key
    Weeks {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Reschedule {
            from_week,
            shift_weeks,
            shift_months,
            sync,
            yes,
            file,
        } => {
            // Validate arguments before load_config can write a template
            let shift = commands::reschedule::parse_shift(shift_weeks, shift_months)?;
            let config = load_config()?;
            let path = schedule_path(&config, file)?;
            let args = commands::reschedule::Args {
                from_week,
                shift,
                sync,
                yes,
            };
            commands::reschedule::run(&config, &path, args).await
        }
        Commands::Sync { file } => {
            let config = load_config()?;
            let path = schedule_path(&config, file)?;
            commands::sync::run(&config, &path).await
        }
        Commands::Auth => commands::auth::run(&load_config()?).await,
        Commands::Weeks { file } => {
            let config = load_config()?;
            let path = schedule_path(&config, file)?;
            commands::weeks::run(&config, &path)
        }
    }
}

fn load_config() -> Result<LearnplanConfig> {
    LearnplanConfig::load().context("Failed to load learnplan config")
}

/// `--file` wins over the configured path.
fn schedule_path(config: &LearnplanConfig, file: Option<PathBuf>) -> Result<PathBuf> {
    let path = match file {
        Some(file) => expand_path(&file)?,
        None => config.schedule_path()?,
    };
    log::debug!("Using schedule {}", path.display());
    Ok(path)
}

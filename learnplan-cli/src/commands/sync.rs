use std::path::Path;

use anyhow::{Context, Result};
use learnplan_core::Schedule;
use learnplan_core::config::LearnplanConfig;
use learnplan_core::remote::{CalendarApi, Provider};
use learnplan_core::sync::{SyncEngine, SyncReport};
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize, render_outcome};
use crate::utils::tui;

pub async fn run(config: &LearnplanConfig, path: &Path) -> Result<()> {
    let schedule = Schedule::load(path, &config.columns)?;
    push(config, &schedule).await?;
    Ok(())
}

/// Authenticate, resolve the calendar and upsert one event per row.
pub async fn push(config: &LearnplanConfig, schedule: &Schedule) -> Result<SyncReport> {
    let provider = Provider::from_name(&config.provider);

    // Authentication may open a browser, so no spinner here
    let account = provider
        .authenticate()
        .await
        .context("Could not authenticate with the calendar provider")?;
    log::info!("Authenticated as {}", account);

    let engine = SyncEngine::new(&provider, &config.calendar);

    let spinner = tui::create_spinner(format!("📅 {}", config.calendar.name));
    let calendar_id = engine.ensure_calendar().await;
    spinner.finish_and_clear();
    let calendar_id = calendar_id.context("Could not find or create the calendar")?;

    println!("📅 {}", config.calendar.name);

    let count = schedule.len();
    let spinner = tui::create_spinner(format!(
        "   Syncing {} {}",
        count,
        pluralize("week", count)
    ));
    let report = engine
        .run(&calendar_id, &schedule.rows, |row, outcome| {
            spinner.suspend(|| println!("{}", render_outcome(row, outcome)));
        })
        .await;
    spinner.finish_and_clear();

    println!("\n{}", report.render());

    if !report.failures.is_empty() {
        println!("\n{}", "Failed weeks:".red());
        for failure in &report.failures {
            println!("   {} ({}): {}", failure.label, failure.key, failure.error.dimmed());
        }
    }

    Ok(report)
}

use std::path::Path;

use anyhow::Result;
use learnplan_core::Schedule;
use learnplan_core::config::LearnplanConfig;
use owo_colors::OwoColorize;

use crate::render::render_week;

/// Print the calendar view of the plan without touching the calendar.
pub fn run(config: &LearnplanConfig, path: &Path) -> Result<()> {
    let schedule = Schedule::load(path, &config.columns)?;

    if schedule.is_empty() {
        println!("{}", "No weeks in the plan".dimmed());
        return Ok(());
    }

    println!("{}", format!("{:>5}  {:<13}  {}", "index", "week", "key").dimmed());

    for row in &schedule.rows {
        println!("{}", render_week(row));
    }

    Ok(())
}

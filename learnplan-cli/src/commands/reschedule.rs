use std::path::Path;

use anyhow::Result;
use dialoguer::Confirm;
use learnplan_core::Schedule;
use learnplan_core::config::LearnplanConfig;
use learnplan_core::reschedule::{self, Shift};
use owo_colors::OwoColorize;

use crate::commands::sync;
use crate::render::{pluralize, render_move};

pub struct Args {
    pub from_week: i64,
    pub shift: Shift,
    pub sync: bool,
    pub yes: bool,
}

/// Reject shifts that would do nothing or cannot be applied to a date.
pub fn parse_shift(weeks: i64, months: i64) -> Result<Shift> {
    let shift = Shift::new(weeks, months);

    if shift.is_zero() {
        anyhow::bail!("Nothing to do: pass --shift-weeks and/or --shift-months");
    }
    if shift.as_duration().is_none() {
        anyhow::bail!("Shift of {} weeks and {} months is out of range", weeks, months);
    }

    Ok(shift)
}

pub async fn run(config: &LearnplanConfig, path: &Path, args: Args) -> Result<()> {
    let shift = args.shift;
    let days = shift.as_duration().map(|d| d.num_days()).unwrap_or_default();

    let mut schedule = Schedule::load(path, &config.columns)?;

    let affected = schedule
        .rows
        .iter()
        .filter(|row| row.global_week_index() >= args.from_week)
        .count();

    if affected == 0 {
        println!(
            "{}",
            format!("No weeks at or after index {}", args.from_week).dimmed()
        );
        return Ok(());
    }

    // Work on a copy so the plan shown is exactly what gets saved
    let mut rows = schedule.rows.clone();
    let moved = reschedule::shift(&mut rows, args.from_week, shift)?;

    println!(
        "Shifting {} {} from index {} by {} {} and {} {} ({} days)",
        affected,
        pluralize("week", affected),
        args.from_week,
        shift.weeks,
        pluralize("week", shift.weeks.unsigned_abs() as usize),
        shift.months,
        pluralize("month", shift.months.unsigned_abs() as usize),
        days
    );

    if moved.is_empty() {
        println!("{}", "   No week changes month".dimmed());
    }
    for m in &moved {
        println!("{}", render_move(&rows[m.index], m));
    }

    if !args.yes {
        println!();
        let confirmed = Confirm::new()
            .with_prompt(format!("Rewrite {}?", path.display()))
            .default(false)
            .interact()?;

        if !confirmed {
            anyhow::bail!("Reschedule cancelled");
        }
    }

    schedule.rows = rows;
    schedule.save(path)?;

    println!("\n{} {}", "Saved".green(), path.display());

    if args.sync {
        println!();
        sync::push(config, &schedule).await?;
    } else {
        println!("Run `learnplan sync` to update the calendar.");
    }

    Ok(())
}

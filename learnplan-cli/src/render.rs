//! Colored terminal rendering for learnplan types.

use chrono::{Duration, NaiveDate};
use learnplan_core::ScheduleRow;
use learnplan_core::reschedule::MovedRow;
use learnplan_core::sync::{RowOutcome, SyncReport};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for SyncReport {
    fn render(&self) -> String {
        let mut parts = vec![
            format!("{} created", self.created).green().to_string(),
            format!("{} updated", self.updated).yellow().to_string(),
        ];
        if self.skipped > 0 {
            parts.push(format!("{} skipped", self.skipped).red().to_string());
        }
        format!("Synced {} weeks: {}", self.total(), parts.join(", "))
    }
}

impl Render for ScheduleRow {
    fn render(&self) -> String {
        format!("{} {}", self.label().bold(), self.content)
    }
}

pub fn render_outcome(row: &ScheduleRow, outcome: &RowOutcome) -> String {
    match outcome {
        RowOutcome::Created(_) => format!("   {} {}", "+".green(), row.render().green()),
        RowOutcome::Updated(_) => format!("   {} {}", "~".yellow(), row.render().yellow()),
        RowOutcome::Skipped(error) => format!(
            "   {} {} {}",
            "!".red(),
            row.render().red(),
            error.dimmed()
        ),
    }
}

pub fn render_move(row: &ScheduleRow, moved: &MovedRow) -> String {
    let (from_year, from_month) = moved.from;
    let (to_year, to_month) = moved.to;

    format!(
        "   {}/{:02} {} {}/{:02} Week{} {}",
        from_year,
        from_month,
        "->".dimmed(),
        to_year,
        to_month,
        row.week,
        row.content.dimmed()
    )
}

/// `11/30 - 12/06`, both ends inclusive.
pub fn render_span(start: NaiveDate, end_exclusive: NaiveDate) -> String {
    let last = end_exclusive - Duration::days(1);
    format!("{} - {}", start.format("%m/%d"), last.format("%m/%d"))
}

pub fn render_week(row: &ScheduleRow) -> String {
    let span = match row.week_range() {
        Ok(range) => render_span(range.start, range.end),
        Err(e) => e.to_string().red().to_string(),
    };

    format!(
        "{:>5}  {}  {}  {}",
        row.global_week_index(),
        span,
        row.sync_key().to_string().dimmed(),
        row.render()
    )
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_shows_inclusive_last_day() {
        let start = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 7).unwrap();
        assert_eq!(render_span(start, end), "11/30 - 12/06");
    }

    #[test]
    fn test_report_mentions_skipped_only_when_present() {
        let clean = SyncReport {
            created: 2,
            updated: 1,
            ..Default::default()
        };
        assert!(!clean.render().contains("skipped"));

        let failed = SyncReport {
            skipped: 1,
            ..clean
        };
        assert!(failed.render().contains("1 skipped"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("week", 1), "week");
        assert_eq!(pluralize("week", 3), "weeks");
    }
}

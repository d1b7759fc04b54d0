//! Pushing part of the plan back in time.
//!
//! A month is treated as a 30-day block. The shifted date only decides the
//! row's new year and month; the row keeps its week-of-month, so after a
//! month shift it lands on the same ordinal week of its new month.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{PlanError, PlanResult};
use crate::row::ScheduleRow;
use crate::week;

/// Days counted per month when shifting.
pub const DAYS_PER_MONTH: i64 = 30;

/// How far to move rows. Negative values move rows earlier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shift {
    pub weeks: i64,
    pub months: i64,
}

impl Shift {
    pub fn new(weeks: i64, months: i64) -> Self {
        Shift { weeks, months }
    }

    pub fn is_zero(&self) -> bool {
        self.weeks == 0 && self.months == 0
    }

    /// Total offset, or `None` if it does not fit in a `Duration`.
    pub fn as_duration(&self) -> Option<Duration> {
        let weeks = Duration::try_weeks(self.weeks)?;
        let months = Duration::try_days(self.months.checked_mul(DAYS_PER_MONTH)?)?;
        weeks.checked_add(&months)
    }
}

/// A row whose year/month changed during [`shift`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedRow {
    /// Position in the row sequence
    pub index: usize,
    pub from: (i32, u32),
    pub to: (i32, u32),
}

/// Date a row's week is counted from when shifting: the 1st of its month
/// plus `week - 1` weeks.
pub fn base_date(row: &ScheduleRow) -> PlanResult<NaiveDate> {
    let first = week::first_of_month(row.year, row.month)?;
    first
        .checked_add_signed(Duration::weeks(i64::from(row.week) - 1))
        .ok_or(PlanError::InvalidDate {
            year: row.year,
            month: row.month,
        })
}

/// Shift every row whose global week index is at least `from_week`.
///
/// Only `year` and `month` are rewritten. Rows are validated before any of
/// them is touched, so an error leaves `rows` unchanged. Returns the rows
/// whose year or month actually changed.
pub fn shift(rows: &mut [ScheduleRow], from_week: i64, shift: Shift) -> PlanResult<Vec<MovedRow>> {
    let offset = shift.as_duration().ok_or_else(|| {
        PlanError::Config(format!(
            "shift of {} weeks and {} months is out of range",
            shift.weeks, shift.months
        ))
    })?;

    let mut targets = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        if row.global_week_index() < from_week {
            continue;
        }

        let shifted = base_date(row)?
            .checked_add_signed(offset)
            .ok_or(PlanError::InvalidDate {
                year: row.year,
                month: row.month,
            })?;

        targets.push((index, shifted.year(), shifted.month()));
    }

    let mut moved = Vec::new();

    for (index, year, month) in targets {
        let row = &mut rows[index];
        let from = (row.year, row.month);

        row.year = year;
        row.month = month;

        if from != (year, month) {
            moved.push(MovedRow {
                index,
                from,
                to: (year, month),
            });
        }
    }

    Ok(moved)
}

//! Week arithmetic.
//!
//! Weeks are anchored on Saturdays: week `n` of a month is the `n`-th
//! Saturday on or after the 1st, and the calendar span of that week runs
//! from the preceding Sunday through the Saturday itself.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::{PlanError, PlanResult};

/// Year the global week index counts from.
pub const EPOCH_YEAR: i32 = 2025;

/// Approximate linear week counter, only meaningful for comparisons.
///
/// `(year - EPOCH_YEAR) * 52 + month * 4 + week`
pub fn global_week_index(year: i32, month: u32, week: u32) -> i64 {
    (i64::from(year) - i64::from(EPOCH_YEAR)) * 52 + i64::from(month) * 4 + i64::from(week)
}

pub fn first_of_month(year: i32, month: u32) -> PlanResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(PlanError::InvalidDate { year, month })
}

/// The Saturday representing `week` of `month`.
///
/// Weeks past the end of the month spill into the following month(s).
pub fn week_anchor_date(year: i32, month: u32, week: u32) -> PlanResult<NaiveDate> {
    let first = first_of_month(year, month)?;
    let days_until_saturday = (Weekday::Sat.num_days_from_monday() + 7
        - first.weekday().num_days_from_monday())
        % 7;

    let offset = Duration::days(i64::from(days_until_saturday))
        + Duration::weeks(i64::from(week) - 1);

    first
        .checked_add_signed(offset)
        .ok_or(PlanError::InvalidDate { year, month })
}

/// All-day span of one week: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    /// Sunday before the anchor (inclusive)
    pub start: NaiveDate,
    /// Day after the anchor (exclusive)
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn from_anchor(anchor: NaiveDate) -> Self {
        WeekRange {
            start: anchor - Duration::days(6),
            end: anchor + Duration::days(1),
        }
    }

    /// Last day included in the range.
    pub fn anchor(&self) -> NaiveDate {
        self.end - Duration::days(1)
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Shorthand for [`WeekRange::from_anchor`].
pub fn week_range(anchor: NaiveDate) -> WeekRange {
    WeekRange::from_anchor(anchor)
}

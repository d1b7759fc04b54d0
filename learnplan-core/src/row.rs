//! A single week of the learning plan.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlanResult;
use crate::week::{self, WeekRange};

/// One row of the schedule file.
///
/// `(year, month, week)` identifies the row. `week` is the 1-based week of
/// the month and is never touched by rescheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub year: i32,
    pub month: u32,
    pub week: u32,
    pub content: String,
    pub project: String,
    pub process: String,
    pub claude_usage: String,
    pub url: String,

    /// Columns the store does not know about, keyed by header label.
    /// Kept so a load/save cycle does not drop them.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl ScheduleRow {
    pub fn new(year: i32, month: u32, week: u32, content: impl Into<String>) -> Self {
        ScheduleRow {
            year,
            month,
            week,
            content: content.into(),
            project: String::new(),
            process: String::new(),
            claude_usage: String::new(),
            url: String::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn sync_key(&self) -> SyncKey {
        SyncKey::new(self.year, self.month, self.week)
    }

    pub fn global_week_index(&self) -> i64 {
        week::global_week_index(self.year, self.month, self.week)
    }

    /// The Saturday this row's week ends on.
    pub fn anchor_date(&self) -> PlanResult<chrono::NaiveDate> {
        week::week_anchor_date(self.year, self.month, self.week)
    }

    pub fn week_range(&self) -> PlanResult<WeekRange> {
        Ok(WeekRange::from_anchor(self.anchor_date()?))
    }

    /// "2025/12 Week1", used in console output and log lines.
    pub fn label(&self) -> String {
        format!("{}/{:02} Week{}", self.year, self.month, self.week)
    }
}

/// Stable identifier correlating a row with exactly one calendar event.
///
/// Rendered as `{year}-{month:02}-{week}`, e.g. `2025-12-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SyncKey(String);

impl SyncKey {
    pub fn new(year: i32, month: u32, week: u32) -> Self {
        SyncKey(format!("{}-{:02}-{}", year, month, week))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyncKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_key_pads_month_only() {
        assert_eq!(SyncKey::new(2025, 12, 1).as_str(), "2025-12-1");
        assert_eq!(SyncKey::new(2026, 3, 12).as_str(), "2026-03-12");
    }

    #[test]
    fn test_label() {
        let row = ScheduleRow::new(2026, 2, 3, "Rust");
        assert_eq!(row.label(), "2026/02 Week3");
    }
}

//! Settings for the calendar that mirrors the plan.

use serde::{Deserialize, Serialize};

use crate::event::Reminder;

pub const DEFAULT_CALENDAR_NAME: &str = "フルスタック学習プログラム";
pub const DEFAULT_CALENDAR_DESCRIPTION: &str = "フルスタックエンジニア学習プログラムのスケジュール";
pub const DEFAULT_TIME_ZONE: &str = "Asia/Tokyo";
/// Google color id 9 (blueberry)
pub const DEFAULT_COLOR_ID: &str = "9";
pub const DEFAULT_KEY_FIELD: &str = "fslearning_key";

/// One day and one hour before the event
pub const DEFAULT_REMINDER_MINUTES: [i64; 2] = [1440, 60];

/// The `[calendar]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Display name used to find (or create) the calendar
    pub name: String,
    pub time_zone: String,
    pub description: String,
    /// Applied to every event
    pub color_id: String,
    pub reminder_method: String,
    pub reminder_minutes: Vec<i64>,
    /// Private extended property holding the sync key
    pub key_field: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            name: DEFAULT_CALENDAR_NAME.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            description: DEFAULT_CALENDAR_DESCRIPTION.to_string(),
            color_id: DEFAULT_COLOR_ID.to_string(),
            reminder_method: "popup".to_string(),
            reminder_minutes: DEFAULT_REMINDER_MINUTES.to_vec(),
            key_field: DEFAULT_KEY_FIELD.to_string(),
        }
    }
}

impl SyncConfig {
    pub fn reminders(&self) -> Vec<Reminder> {
        self.reminder_minutes
            .iter()
            .map(|&minutes| Reminder {
                method: self.reminder_method.clone(),
                minutes,
            })
            .collect()
    }
}

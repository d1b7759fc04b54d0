//! Provider-neutral event types.
//!
//! The sync engine builds an [`EventPayload`] per schedule row and hands it
//! to a calendar provider. Providers answer with [`RemoteEvent`]s.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything written to the calendar for one week.
///
/// Updates send the full payload, so whatever is on the calendar is
/// replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    /// First day of the all-day event (inclusive)
    pub start: NaiveDate,
    /// Day after the last day of the event (exclusive)
    pub end: NaiveDate,
    pub color_id: String,
    /// Explicit reminders; the calendar's defaults are not used
    pub reminders: Vec<Reminder>,
    /// Private metadata, only visible to this application
    pub private_properties: BTreeMap<String, String>,
}

/// A reminder/alarm for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// How the reminder is delivered, e.g. "popup"
    pub method: String,
    /// Minutes before the event to trigger
    pub minutes: i64,
}

/// An event as it exists on the remote calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    pub title: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Match events by one private property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub key: String,
    pub value: String,
}

impl EventFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        EventFilter {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, properties: &BTreeMap<String, String>) -> bool {
        properties.get(&self.key) == Some(&self.value)
    }

    /// `key=value`, the form Google expects for `privateExtendedProperty`.
    pub fn to_query(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

//! Direct calls to the Calendar v3 REST API for the event lookup and the
//! writes learnplan makes.
//!
//! Event bodies carry `extendedProperties.private`, so they are modelled
//! here rather than through `google_calendar::types`.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

const API_BASE: &str = "https://www.googleapis.com/calendar/v3/";

/// An all-day date, `{"date": "2025-11-30"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedProperties {
    #[serde(default)]
    pub private: BTreeMap<String, String>,
}

/// The event resource as sent to Google.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    pub summary: String,
    pub description: String,
    pub start: EventDate,
    pub end: EventDate,
    pub color_id: String,
    pub reminders: Reminders,
    pub extended_properties: ExtendedProperties,
}

/// The subset of the event resource Google sends back that we read.
#[derive(Debug, Clone, Deserialize)]
pub struct EventResource {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: Option<EventDate>,
    #[serde(default)]
    pub end: Option<EventDate>,
}

#[derive(Debug, Default, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<EventResource>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarBody<'a> {
    summary: &'a str,
    description: &'a str,
    time_zone: &'a str,
}

#[derive(Debug, Deserialize)]
struct CalendarResource {
    id: String,
}

pub struct CalendarRest {
    http: reqwest::Client,
    access_token: String,
}

impl CalendarRest {
    pub fn new(access_token: &str) -> Self {
        CalendarRest {
            http: reqwest::Client::new(),
            access_token: access_token.to_string(),
        }
    }

    pub async fn create_calendar(
        &self,
        name: &str,
        time_zone: &str,
        description: &str,
    ) -> Result<String> {
        let body = CalendarBody {
            summary: name,
            description,
            time_zone,
        };

        let calendar: CalendarResource = self
            .send(self.http.post(endpoint(&["calendars"])?).json(&body))
            .await
            .with_context(|| format!("Failed to create calendar: {}", name))?;

        Ok(calendar.id)
    }

    /// Events carrying the private extended property `key=value`, at most
    /// `max_results` of them, in a single request.
    pub async fn find_events(
        &self,
        calendar_id: &str,
        private_property: &str,
        max_results: usize,
    ) -> Result<Vec<EventResource>> {
        let url = endpoint(&["calendars", calendar_id, "events"])?;
        let query = lookup_query(private_property, max_results);

        let list: EventList = self
            .send(self.http.get(url).query(&query))
            .await
            .with_context(|| format!("Failed to look up events with {}", private_property))?;

        Ok(list.items.into_iter().take(max_results).collect())
    }

    pub async fn insert_event(&self, calendar_id: &str, body: &EventBody) -> Result<EventResource> {
        let url = endpoint(&["calendars", calendar_id, "events"])?;

        self.send(self.http.post(url).json(body))
            .await
            .with_context(|| format!("Failed to create event: {}", body.summary))
    }

    pub async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        body: &EventBody,
    ) -> Result<EventResource> {
        let url = endpoint(&["calendars", calendar_id, "events", event_id])?;

        self.send(self.http.put(url).json(body))
            .await
            .with_context(|| format!("Failed to update event: {}", body.summary))
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Request to Google Calendar failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Google Calendar returned {}: {}", status, error_text);
        }

        response
            .json()
            .await
            .context("Failed to parse Google Calendar response")
    }
}

/// Google rejects `maxResults=0`, so at least one result is requested.
fn lookup_query(private_property: &str, max_results: usize) -> [(&'static str, String); 3] {
    [
        ("privateExtendedProperty", private_property.to_string()),
        ("maxResults", max_results.max(1).to_string()),
        ("showDeleted", "false".to_string()),
    ]
}

/// Build an API url, percent-encoding each path segment.
fn endpoint(segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(API_BASE)?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Invalid API base url"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_calendar_id() {
        let url = endpoint(&["calendars", "abc#x@group.calendar.google.com", "events"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/abc%23x@group.calendar.google.com/events"
        );
    }

    #[test]
    fn test_lookup_query_sends_limit() {
        let query = lookup_query("fslearning_key=2025-12-1", 1);
        assert_eq!(query[0], ("privateExtendedProperty", "fslearning_key=2025-12-1".to_string()));
        assert_eq!(query[1], ("maxResults", "1".to_string()));

        let mut url = endpoint(&["calendars", "primary", "events"]).unwrap();
        url.query_pairs_mut().extend_pairs(query.iter());
        assert_eq!(
            url.query(),
            Some("privateExtendedProperty=fslearning_key%3D2025-12-1&maxResults=1&showDeleted=false")
        );
    }

    #[test]
    fn test_event_list_without_items() {
        let list: EventList = serde_json::from_str(r#"{"kind": "calendar#events"}"#).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_event_resource_without_dates() {
        let event: EventResource = serde_json::from_str(r#"{"id": "e1"}"#).unwrap();
        assert_eq!(event.id, "e1");
        assert!(event.start.is_none());
        assert_eq!(event.summary, "");
    }
}

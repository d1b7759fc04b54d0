//! Defines the JSON protocol used for communication between learnplan
//! and provider binaries over stdin/stdout.
//!
//! Each request is one line: `{"command": "...", "params": {...}}`.
//! The provider answers with one line tagged by `status`.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::{EventFilter, EventPayload, RemoteEvent};

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Authenticate,
    FindCalendar,
    CreateCalendar,
    ListEvents,
    CreateEvent,
    UpdateEvent,
}

/// Request sent from learnplan to provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from provider to learnplan.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap_or_else(|e| {
            Response::<()>::error(&format!("Failed to serialize response: {e}"))
        })
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::json!({ "status": "error", "error": msg }).to_string()
    }
}

/// Make sure the provider holds a usable session, running its login flow
/// if needed.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Authenticate {}

impl ProviderCommand for Authenticate {
    type Response = String; // Account identifier (e.g., email)
    fn command() -> Command {
        Command::Authenticate
    }
}

/// Look up a calendar by its display name.
#[derive(Debug, Serialize, Deserialize)]
pub struct FindCalendar {
    pub name: String,
}

impl ProviderCommand for FindCalendar {
    type Response = Option<String>;
    fn command() -> Command {
        Command::FindCalendar
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCalendar {
    pub name: String,
    pub time_zone: String,
    pub description: String,
}

impl ProviderCommand for CreateCalendar {
    type Response = String; // Calendar id
    fn command() -> Command {
        Command::CreateCalendar
    }
}

/// List events whose private property matches `filter`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEvents {
    pub calendar_id: String,
    pub filter: EventFilter,
    pub limit: usize,
}

impl ProviderCommand for ListEvents {
    type Response = Vec<RemoteEvent>;
    fn command() -> Command {
        Command::ListEvents
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    pub calendar_id: String,
    pub event: EventPayload,
}

impl ProviderCommand for CreateEvent {
    type Response = RemoteEvent;
    fn command() -> Command {
        Command::CreateEvent
    }
}

/// Replace an existing event with a new payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub calendar_id: String,
    pub event_id: String,
    pub event: EventPayload,
}

impl ProviderCommand for UpdateEvent {
    type Response = RemoteEvent;
    fn command() -> Command {
        Command::UpdateEvent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = Request {
            command: FindCalendar::command(),
            params: serde_json::to_value(FindCalendar {
                name: "Study".into(),
            })
            .unwrap(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"command":"find_calendar","params":{"name":"Study"}}"#);
    }

    #[test]
    fn test_response_wire_format() {
        let ok = Response::success(Some("cal-1".to_string()));
        assert_eq!(ok, r#"{"status":"success","data":"cal-1"}"#);

        let parsed: Response<Option<String>> =
            serde_json::from_str(&Response::<()>::error("boom")).unwrap();
        assert!(matches!(parsed, Response::Error { error } if error == "boom"));
    }
}

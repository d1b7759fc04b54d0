//! Conversions between learnplan events and Google's event shapes.

use learnplan_core::event::{EventPayload, RemoteEvent};

use crate::api::{EventBody, EventDate, EventResource, ExtendedProperties, ReminderOverride, Reminders};

pub trait ToGoogle {
    fn to_google(&self) -> EventBody;
}

impl ToGoogle for EventPayload {
    fn to_google(&self) -> EventBody {
        EventBody {
            summary: self.title.clone(),
            description: self.description.clone(),
            start: EventDate {
                date: Some(self.start),
            },
            end: EventDate {
                date: Some(self.end),
            },
            color_id: self.color_id.clone(),
            reminders: Reminders {
                use_default: false,
                overrides: self
                    .reminders
                    .iter()
                    .map(|r| ReminderOverride {
                        method: r.method.clone(),
                        minutes: r.minutes,
                    })
                    .collect(),
            },
            extended_properties: ExtendedProperties {
                private: self.private_properties.clone(),
            },
        }
    }
}

pub trait FromGoogle {
    fn from_google(event: EventResource) -> Self;
}

impl FromGoogle for RemoteEvent {
    fn from_google(event: EventResource) -> Self {
        RemoteEvent {
            id: event.id,
            title: event.summary,
            start: event.start.and_then(|d| d.date),
            end: event.end.and_then(|d| d.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use learnplan_core::event::Reminder;

    use super::*;

    fn payload() -> EventPayload {
        EventPayload {
            title: "Week 1: HTML/CSS基礎".into(),
            description: "📚 学習内容: HTML/CSS基礎".into(),
            start: NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 12, 7).unwrap(),
            color_id: "9".into(),
            reminders: vec![
                Reminder {
                    method: "popup".into(),
                    minutes: 1440,
                },
                Reminder {
                    method: "popup".into(),
                    minutes: 60,
                },
            ],
            private_properties: BTreeMap::from([(
                "fslearning_key".to_string(),
                "2025-12-1".to_string(),
            )]),
        }
    }

    #[test]
    fn test_body_matches_google_wire_shape() {
        let json = serde_json::to_value(payload().to_google()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "summary": "Week 1: HTML/CSS基礎",
                "description": "📚 学習内容: HTML/CSS基礎",
                "start": { "date": "2025-11-30" },
                "end": { "date": "2025-12-07" },
                "colorId": "9",
                "reminders": {
                    "useDefault": false,
                    "overrides": [
                        { "method": "popup", "minutes": 1440 },
                        { "method": "popup", "minutes": 60 }
                    ]
                },
                "extendedProperties": {
                    "private": { "fslearning_key": "2025-12-1" }
                }
            })
        );
    }

    #[test]
    fn test_remote_event_from_resource() {
        let resource: EventResource = serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "summary": "Week 1: HTML/CSS基礎",
            "start": { "date": "2025-11-30" },
            "end": { "date": "2025-12-07" },
            "status": "confirmed"
        }))
        .unwrap();

        let event = RemoteEvent::from_google(resource);
        assert_eq!(event.id, "abc123");
        assert_eq!(event.start, NaiveDate::from_ymd_opt(2025, 11, 30));
        assert_eq!(event.end, NaiveDate::from_ymd_opt(2025, 12, 7));
    }
}

//! In-memory calendar for tests and offline runs.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{PlanError, PlanResult};
use crate::event::{EventFilter, EventPayload, RemoteEvent};
use crate::remote::CalendarApi;

#[derive(Debug, Clone)]
pub struct StoredCalendar {
    pub id: String,
    pub name: String,
    pub time_zone: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub id: String,
    pub calendar_id: String,
    pub payload: EventPayload,
}

#[derive(Debug, Default)]
struct State {
    calendars: Vec<StoredCalendar>,
    events: Vec<StoredEvent>,
    next_id: usize,
    failing_values: BTreeSet<String>,
    reject_auth: bool,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// A calendar that lives in memory. Not thread-safe; the sync engine only
/// ever makes one call at a time.
#[derive(Debug, Default)]
pub struct MemoryCalendar {
    state: RefCell<State>,
}

impl MemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make any call touching an event keyed by `value` fail.
    pub fn fail_on(&self, value: &str) {
        self.state.borrow_mut().failing_values.insert(value.to_string());
    }

    pub fn reject_auth(&self) {
        self.state.borrow_mut().reject_auth = true;
    }

    pub fn calendars(&self) -> Vec<StoredCalendar> {
        self.state.borrow().calendars.clone()
    }

    pub fn events(&self) -> Vec<StoredEvent> {
        self.state.borrow().events.clone()
    }

    fn check_failure(&self, properties: &BTreeMap<String, String>) -> PlanResult<()> {
        let state = self.state.borrow();
        match properties.values().find(|v| state.failing_values.contains(*v)) {
            Some(value) => Err(PlanError::Provider(format!("simulated failure for {value}"))),
            None => Ok(()),
        }
    }

    fn to_remote(event: &StoredEvent) -> RemoteEvent {
        RemoteEvent {
            id: event.id.clone(),
            title: event.payload.title.clone(),
            start: Some(event.payload.start),
            end: Some(event.payload.end),
        }
    }
}

impl CalendarApi for MemoryCalendar {
    async fn authenticate(&self) -> PlanResult<String> {
        if self.state.borrow().reject_auth {
            return Err(PlanError::Auth("memory calendar rejected login".into()));
        }
        Ok("memory".to_string())
    }

    async fn find_calendar_by_name(&self, name: &str) -> PlanResult<Option<String>> {
        Ok(self
            .state
            .borrow()
            .calendars
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id.clone()))
    }

    async fn create_calendar(
        &self,
        name: &str,
        time_zone: &str,
        description: &str,
    ) -> PlanResult<String> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id("calendar");
        state.calendars.push(StoredCalendar {
            id: id.clone(),
            name: name.to_string(),
            time_zone: time_zone.to_string(),
            description: description.to_string(),
        });
        Ok(id)
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        filter: &EventFilter,
        limit: usize,
    ) -> PlanResult<Vec<RemoteEvent>> {
        if self.state.borrow().failing_values.contains(&filter.value) {
            return Err(PlanError::Provider(format!(
                "simulated failure for {}",
                filter.value
            )));
        }

        Ok(self
            .state
            .borrow()
            .events
            .iter()
            .filter(|e| {
                e.calendar_id == calendar_id && filter.matches(&e.payload.private_properties)
            })
            .take(limit)
            .map(Self::to_remote)
            .collect())
    }

    async fn create_event(
        &self,
        calendar_id: &str,
        payload: &EventPayload,
    ) -> PlanResult<RemoteEvent> {
        self.check_failure(&payload.private_properties)?;

        let mut state = self.state.borrow_mut();
        let event = StoredEvent {
            id: state.next_id("event"),
            calendar_id: calendar_id.to_string(),
            payload: payload.clone(),
        };
        state.events.push(event.clone());
        Ok(Self::to_remote(&event))
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        payload: &EventPayload,
    ) -> PlanResult<RemoteEvent> {
        self.check_failure(&payload.private_properties)?;

        let mut state = self.state.borrow_mut();
        let event = state
            .events
            .iter_mut()
            .find(|e| e.calendar_id == calendar_id && e.id == event_id)
            .ok_or_else(|| PlanError::Provider(format!("event {event_id} not found")))?;
        event.payload = payload.clone();
        Ok(Self::to_remote(event))
    }
}

pub mod memory;
pub mod protocol;
pub mod provider;

use crate::error::PlanResult;
use crate::event::{EventFilter, EventPayload, RemoteEvent};

pub use memory::MemoryCalendar;
pub use provider::Provider;

/// The external calendar the plan is mirrored into.
///
/// [`Provider`] implements this over a provider binary, [`MemoryCalendar`]
/// keeps everything in memory.
#[allow(async_fn_in_trait)]
pub trait CalendarApi {
    /// Obtain a usable session. May block on user interaction.
    async fn authenticate(&self) -> PlanResult<String>;

    async fn find_calendar_by_name(&self, name: &str) -> PlanResult<Option<String>>;

    async fn create_calendar(
        &self,
        name: &str,
        time_zone: &str,
        description: &str,
    ) -> PlanResult<String>;

    async fn list_events(
        &self,
        calendar_id: &str,
        filter: &EventFilter,
        limit: usize,
    ) -> PlanResult<Vec<RemoteEvent>>;

    async fn create_event(
        &self,
        calendar_id: &str,
        payload: &EventPayload,
    ) -> PlanResult<RemoteEvent>;

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        payload: &EventPayload,
    ) -> PlanResult<RemoteEvent>;
}

//! Upserting the plan into a calendar, one row at a time.

use crate::config::SyncConfig;
use crate::error::PlanResult;
use crate::event::{EventFilter, RemoteEvent};
use crate::remote::CalendarApi;
use crate::row::ScheduleRow;
use crate::sync::payload::event_payload;
use crate::sync::report::{RowOutcome, SyncReport};

pub struct SyncEngine<'a, C: CalendarApi> {
    api: &'a C,
    config: &'a SyncConfig,
}

impl<'a, C: CalendarApi> SyncEngine<'a, C> {
    pub fn new(api: &'a C, config: &'a SyncConfig) -> Self {
        SyncEngine { api, config }
    }

    /// Id of the calendar named in the config, creating it if missing.
    pub async fn ensure_calendar(&self) -> PlanResult<String> {
        if let Some(id) = self.api.find_calendar_by_name(&self.config.name).await? {
            log::debug!("Found calendar '{}' ({})", self.config.name, id);
            return Ok(id);
        }

        let id = self
            .api
            .create_calendar(
                &self.config.name,
                &self.config.time_zone,
                &self.config.description,
            )
            .await?;
        log::info!("Created calendar '{}' ({})", self.config.name, id);

        Ok(id)
    }

    /// Create or replace the event for one row.
    pub async fn sync_row(&self, calendar_id: &str, row: &ScheduleRow) -> PlanResult<RowOutcome> {
        let payload = event_payload(row, self.config)?;
        let filter = EventFilter::new(&self.config.key_field, row.sync_key().to_string());

        let existing: Option<RemoteEvent> = self
            .api
            .list_events(calendar_id, &filter, 1)
            .await?
            .into_iter()
            .next();

        match existing {
            Some(event) => {
                let updated = self.api.update_event(calendar_id, &event.id, &payload).await?;
                Ok(RowOutcome::Updated(updated))
            }
            None => {
                let created = self.api.create_event(calendar_id, &payload).await?;
                Ok(RowOutcome::Created(created))
            }
        }
    }

    /// Sync every row in order. A failing row is recorded as skipped and
    /// never stops the run. `on_row` sees each row as soon as it is done.
    pub async fn run<F>(&self, calendar_id: &str, rows: &[ScheduleRow], mut on_row: F) -> SyncReport
    where
        F: FnMut(&ScheduleRow, &RowOutcome),
    {
        let mut report = SyncReport::default();

        for row in rows {
            let outcome = match self.sync_row(calendar_id, row).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::warn!("Skipping {} ({}): {}", row.label(), row.sync_key(), e);
                    RowOutcome::Skipped(e.to_string())
                }
            };

            on_row(row, &outcome);
            report.record(row.sync_key(), row.label(), &outcome);
        }

        report
    }
}

use anyhow::{Context, Result};
use google_calendar::types::MinAccessRole;
use learnplan_core::remote::protocol::{FindCalendar, ProviderCommand};

use crate::session::Session;

pub async fn handle(cmd: FindCalendar) -> Result<<FindCalendar as ProviderCommand>::Response> {
    let client = Session::load_valid().await?.client()?;

    let calendars = client
        .calendar_list()
        .list_all(MinAccessRole::default(), false, false)
        .await
        .context("Failed to list calendars")?
        .body;

    Ok(calendars
        .into_iter()
        .find(|cal| cal.summary == cmd.name)
        .map(|cal| cal.id))
}

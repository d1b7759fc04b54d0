use anyhow::Result;
use learnplan_core::event::RemoteEvent;
use learnplan_core::remote::protocol::{ListEvents, ProviderCommand};

use crate::google_event::FromGoogle;
use crate::session::Session;

pub async fn handle(cmd: ListEvents) -> Result<<ListEvents as ProviderCommand>::Response> {
    let session = Session::load_valid().await?;

    let events = session
        .rest()
        .find_events(&cmd.calendar_id, &cmd.filter.to_query(), cmd.limit)
        .await?;

    Ok(events.into_iter().map(RemoteEvent::from_google).collect())
}

use anyhow::Result;
use learnplan_core::event::RemoteEvent;
use learnplan_core::remote::protocol::{CreateEvent, ProviderCommand};

use crate::google_event::{FromGoogle, ToGoogle};
use crate::session::Session;

pub async fn handle(cmd: CreateEvent) -> Result<<CreateEvent as ProviderCommand>::Response> {
    let session = Session::load_valid().await?;

    let created = session
        .rest()
        .insert_event(&cmd.calendar_id, &cmd.event.to_google())
        .await?;

    Ok(RemoteEvent::from_google(created))
}

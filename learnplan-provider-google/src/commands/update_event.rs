use anyhow::Result;
use learnplan_core::event::RemoteEvent;
use learnplan_core::remote::protocol::{ProviderCommand, UpdateEvent};

use crate::google_event::{FromGoogle, ToGoogle};
use crate::session::Session;

pub async fn handle(cmd: UpdateEvent) -> Result<<UpdateEvent as ProviderCommand>::Response> {
    let session = Session::load_valid().await?;

    // Full replace: fields missing from the body are cleared on Google's side
    let updated = session
        .rest()
        .update_event(&cmd.calendar_id, &cmd.event_id, &cmd.event.to_google())
        .await?;

    Ok(RemoteEvent::from_google(updated))
}

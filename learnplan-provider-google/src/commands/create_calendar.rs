use anyhow::Result;
use learnplan_core::remote::protocol::{CreateCalendar, ProviderCommand};

use crate::session::Session;

pub async fn handle(cmd: CreateCalendar) -> Result<<CreateCalendar as ProviderCommand>::Response> {
    let session = Session::load_valid().await?;

    session
        .rest()
        .create_calendar(&cmd.name, &cmd.time_zone, &cmd.description)
        .await
}

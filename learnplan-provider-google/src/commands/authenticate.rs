use anyhow::Result;
use learnplan_core::remote::protocol::{Authenticate, ProviderCommand};

use crate::auth;
use crate::session::Session;

/// Reuse the stored session when it can still be refreshed, otherwise run
/// the browser login.
pub async fn handle() -> Result<<Authenticate as ProviderCommand>::Response> {
    if let Some(mut session) = Session::load()? {
        match session.refresh_if_needed().await {
            Ok(()) => return Ok(session.account_email),
            Err(e) => eprintln!("Stored Google session is no longer valid ({:#}), logging in again", e),
        }
    }

    let session = auth::login().await?;
    Ok(session.account_email)
}

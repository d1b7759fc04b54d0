use anyhow::Result;
use learnplan_core::config::LearnplanConfig;
use learnplan_core::remote::{CalendarApi, Provider};
use owo_colors::OwoColorize;

pub async fn run(config: &LearnplanConfig) -> Result<()> {
    let provider = Provider::from_name(&config.provider);

    println!("Authenticating with {}...", provider.name());

    // Provider handles the full OAuth flow and stores credentials/tokens
    let account = provider.authenticate().await?;

    println!("Authenticated as: {}", account.green());
    println!("\nRun `learnplan sync` to push your plan to the calendar.");

    Ok(())
}

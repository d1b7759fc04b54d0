//! learnplan-provider-google - Google Calendar provider for learnplan
//!
//! This binary implements the learnplan provider protocol, communicating
//! with learnplan via JSON over stdin/stdout.
//!
//! The provider manages its own credentials and tokens:
//!   ~/.config/learnplan/providers/google/app_config.toml
//!   ~/.config/learnplan/providers/google/session.toml

mod api;
mod app_config;
mod auth;
mod commands;
mod google_event;
mod session;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use learnplan_core::remote::protocol::{Command, Request, Response};
use serde::de::DeserializeOwned;

#[tokio::main]
async fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Failed to read stdin: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(request).await,
            Err(e) => Response::error(&format!("Failed to parse request: {}", e)),
        };

        if writeln!(stdout, "{}", response)
            .and_then(|_| stdout.flush())
            .is_err()
        {
            break;
        }
    }
}

async fn handle_request(request: Request) -> String {
    match dispatch(request).await {
        Ok(data) => Response::success(data),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

async fn dispatch(request: Request) -> Result<serde_json::Value> {
    let params = request.params;

    let data = match request.command {
        Command::Authenticate => serde_json::to_value(commands::authenticate::handle().await?)?,
        Command::FindCalendar => {
            serde_json::to_value(commands::find_calendar::handle(parse(params)?).await?)?
        }
        Command::CreateCalendar => {
            serde_json::to_value(commands::create_calendar::handle(parse(params)?).await?)?
        }
        Command::ListEvents => {
            serde_json::to_value(commands::list_events::handle(parse(params)?).await?)?
        }
        Command::CreateEvent => {
            serde_json::to_value(commands::create_event::handle(parse(params)?).await?)?
        }
        Command::UpdateEvent => {
            serde_json::to_value(commands::update_event::handle(parse(params)?).await?)?
        }
    };

    Ok(data)
}

fn parse<C: DeserializeOwned>(params: serde_json::Value) -> Result<C> {
    serde_json::from_value(params).context("Invalid params")
}

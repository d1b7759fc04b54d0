//! Provider subprocess protocol.
//!
//! This module handles communication with external provider binaries
//! (e.g., `learnplan-provider-google`) using JSON over stdin/stdout.
//!
//! Providers manage their own credentials and tokens. One process is
//! spawned per call.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{PlanError, PlanResult};
use crate::event::{EventFilter, EventPayload, RemoteEvent};
use crate::remote::CalendarApi;
use crate::remote::protocol::{
    Authenticate, Command, CreateCalendar, CreateEvent, FindCalendar, ListEvents,
    ProviderCommand, Request, Response, UpdateEvent,
};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);
/// Auth may wait on the user completing a browser login.
const AUTH_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    fn binary_path(&self) -> PlanResult<std::path::PathBuf> {
        let binary_name = format!("learnplan-provider-{}", self.0);
        which::which(&binary_name).map_err(|_| PlanError::ProviderNotInstalled(binary_name))
    }

    /// Call a typed provider command and return the result.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> PlanResult<C::Response> {
        timeout(PROVIDER_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| PlanError::ProviderTimeout(PROVIDER_TIMEOUT.as_secs()))?
    }

    /// Call with the long auth timeout (for commands that involve user interaction).
    pub async fn call_interactive<C: ProviderCommand>(&self, cmd: C) -> PlanResult<C::Response> {
        timeout(AUTH_TIMEOUT, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| PlanError::ProviderTimeout(AUTH_TIMEOUT.as_secs()))?
    }

    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> PlanResult<R> {
        let params =
            serde_json::to_value(params).map_err(|e| PlanError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json =
            serde_json::to_string(&request).map_err(|e| PlanError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        log::debug!("{} <- {:?}", binary_path.display(), command);

        let output = exchange(provider_command(&binary_path), &request_json).await?;

        if !output.status.success() {
            return Err(PlanError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(PlanError::Provider("Provider returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(&response_str)
            .map_err(|e| PlanError::Provider(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(PlanError::Provider(error)),
        }
    }
}

/// The provider process is killed if the call is dropped, e.g. on timeout,
/// so a late write can never overlap the next call.
fn provider_command(binary_path: &Path) -> TokioCommand {
    let mut command = TokioCommand::new(binary_path);
    command
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::inherit())
        .kill_on_drop(true);
    command
}

/// Send one request line and wait for the process to exit.
async fn exchange(mut command: TokioCommand, request_json: &str) -> PlanResult<Output> {
    let mut child = command
        .spawn()
        .map_err(|e| PlanError::Provider(format!("Failed to spawn provider: {}", e)))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| PlanError::Provider("Provider stdin unavailable".into()))?;
    stdin
        .write_all(format!("{request_json}\n").as_bytes())
        .await?;
    drop(stdin);

    Ok(child.wait_with_output().await?)
}

impl CalendarApi for Provider {
    async fn authenticate(&self) -> PlanResult<String> {
        self.call_interactive(Authenticate {})
            .await
            .map_err(|e| match e {
                PlanError::Provider(msg) => PlanError::Auth(msg),
                other => other,
            })
    }

    async fn find_calendar_by_name(&self, name: &str) -> PlanResult<Option<String>> {
        self.call(FindCalendar {
            name: name.to_string(),
        })
        .await
    }

    async fn create_calendar(
        &self,
        name: &str,
        time_zone: &str,
        description: &str,
    ) -> PlanResult<String> {
        self.call(CreateCalendar {
            name: name.to_string(),
            time_zone: time_zone.to_string(),
            description: description.to_string(),
        })
        .await
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        filter: &EventFilter,
        limit: usize,
    ) -> PlanResult<Vec<RemoteEvent>> {
        self.call(ListEvents {
            calendar_id: calendar_id.to_string(),
            filter: filter.clone(),
            limit,
        })
        .await
    }

    async fn create_event(
        &self,
        calendar_id: &str,
        payload: &EventPayload,
    ) -> PlanResult<RemoteEvent> {
        self.call(CreateEvent {
            calendar_id: calendar_id.to_string(),
            event: payload.clone(),
        })
        .await
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        payload: &EventPayload,
    ) -> PlanResult<RemoteEvent> {
        self.call(UpdateEvent {
            calendar_id: calendar_id.to_string(),
            event_id: event_id.to_string(),
            event: payload.clone(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_provider_binary() {
        let provider = Provider::from_name("does-not-exist-anywhere");
        let result = provider.call(FindCalendar { name: "x".into() }).await;
        assert!(matches!(
            result,
            Err(PlanError::ProviderNotInstalled(name))
                if name == "learnplan-provider-does-not-exist-anywhere"
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timed_out_provider_is_killed() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("late-write");

        let mut command = provider_command(Path::new("/bin/sh"));
        command
            .arg("-c")
            .arg(format!("sleep 1; touch '{}'", marker.display()));

        let result = timeout(Duration::from_millis(100), exchange(command, "{}")).await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exchange_returns_stdout() {
        let mut command = provider_command(Path::new("/bin/sh"));
        command.arg("-c").arg("read line; echo \"$line\"");

        let output = exchange(command, r#"{"command":"authenticate"}"#).await.unwrap();

        assert!(output.status.success());
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            r#"{"command":"authenticate"}"#
        );
    }
}

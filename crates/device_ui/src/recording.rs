use std::collections::HashSet;

use async_trait::async_trait;
use shared::{
    error::{ErrorCode, UiCommandError},
    protocol::{UiCommand, UiEvent},
};
use tokio::sync::{broadcast, Mutex};

use crate::DeviceUi;

/// In-memory device that records every command and lets callers inject
/// events as if the user had touched the screen.
pub struct RecordingDeviceUi {
    commands: Mutex<Vec<UiCommand>>,
    failing: Mutex<HashSet<&'static str>>,
    events: broadcast::Sender<UiEvent>,
}

impl RecordingDeviceUi {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            commands: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            events,
        }
    }

    /// Delivers `event` to every subscriber; returns how many received it.
    pub fn emit(&self, event: UiEvent) -> usize {
        self.events.send(event).unwrap_or(0)
    }

    pub async fn commands(&self) -> Vec<UiCommand> {
        self.commands.lock().await.clone()
    }

    pub async fn take_commands(&self) -> Vec<UiCommand> {
        std::mem::take(&mut *self.commands.lock().await)
    }

    /// Makes every later command with this name fail with `ErrorCode::Busy`.
    pub async fn fail_command(&self, name: &'static str) {
        self.failing.lock().await.insert(name);
    }
}

impl Default for RecordingDeviceUi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceUi for RecordingDeviceUi {
    async fn send_command(&self, command: UiCommand) -> anyhow::Result<()> {
        let name = command.name();
        self.commands.lock().await.push(command);
        if self.failing.lock().await.contains(name) {
            return Err(
                UiCommandError::new(ErrorCode::Busy, format!("{name} rejected: device busy")).into(),
            );
        }
        Ok(())
    }

    fn subscribe_events(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/recording_tests.rs"]
mod tests;

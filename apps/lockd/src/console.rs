//! Line-delimited JSON bridge: UI events in on one stream, UI commands out
//! on another.

use anyhow::Context;
use async_trait::async_trait;
use device_ui::DeviceUi;
use shared::protocol::{UiCommand, UiEvent};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::{broadcast, Mutex},
};
use tracing::{debug, warn};

pub struct ConsoleDeviceUi<W> {
    out: Mutex<W>,
    events: broadcast::Sender<UiEvent>,
}

impl<W> ConsoleDeviceUi<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// `events` is the channel [`pump_events`] feeds; it stays open for as
    /// long as this bridge lives.
    pub fn new(out: W, events: broadcast::Sender<UiEvent>) -> Self {
        Self {
            out: Mutex::new(out),
            events,
        }
    }
}

#[async_trait]
impl<W> DeviceUi for ConsoleDeviceUi<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send_command(&self, command: UiCommand) -> anyhow::Result<()> {
        let name = command.name();
        let mut line = serde_json::to_vec(&command)
            .with_context(|| format!("failed to encode {name} command"))?;
        line.push(b'\n');

        let mut out = self.out.lock().await;
        out.write_all(&line)
            .await
            .with_context(|| format!("failed to write {name} command"))?;
        out.flush().await.context("failed to flush command stream")?;
        Ok(())
    }

    fn subscribe_events(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }
}

/// Reads UI events until EOF; returns how many lines decoded as events.
pub async fn pump_events<R>(
    input: R,
    events: broadcast::Sender<UiEvent>,
) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut decoded = 0;

    while let Some(line) = lines.next_line().await.context("failed to read ui event")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<UiEvent>(line) {
            Ok(event) => {
                decoded += 1;
                if events.send(event).is_err() {
                    debug!("console: no controller subscribed; event dropped");
                }
            }
            Err(error) => warn!(%error, "console: skipped malformed ui event"),
        }
    }

    Ok(decoded)
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;

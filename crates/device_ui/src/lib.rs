//! Seam between the lock controller and the device that renders its panels.

use async_trait::async_trait;
use shared::protocol::{UiCommand, UiEvent};
use tokio::sync::broadcast;

pub mod panels;
mod recording;

pub use recording::RecordingDeviceUi;

/// Device-side UI collaborator.
///
/// Commands are awaited one at a time by the caller; implementations report
/// device failures as errors and never retry on their own.
#[async_trait]
pub trait DeviceUi: Send + Sync {
    async fn send_command(&self, command: UiCommand) -> anyhow::Result<()>;
    fn subscribe_events(&self) -> broadcast::Receiver<UiEvent>;
}

//! PIN-gated lock for the device settings menu.
//!
//! [`LockController`] owns the lock state and the relock timer and reacts to
//! UI events one at a time.

mod controller;
pub mod layout;
mod settings;
mod timer;

pub use controller::{ControllerInput, LockController, PinOutcome};
pub use settings::{LockSettings, SettingsError, MIN_RELOCK_TIMEOUT_MINUTES};

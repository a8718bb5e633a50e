use std::{fmt, time::Duration};

use thiserror::Error;

pub const MIN_RELOCK_TIMEOUT_MINUTES: u64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("pin must not be empty")]
    EmptyPin,
}

/// Immutable controller configuration.
#[derive(Clone)]
pub struct LockSettings {
    pin: String,
    relock_timeout_minutes: u64,
}

impl LockSettings {
    /// Timeouts below [`MIN_RELOCK_TIMEOUT_MINUTES`] (including negative
    /// values) are raised to the floor.
    pub fn new(
        pin: impl Into<String>,
        relock_timeout_minutes: i64,
    ) -> Result<Self, SettingsError> {
        let pin = pin.into();
        if pin.is_empty() {
            return Err(SettingsError::EmptyPin);
        }

        let floor = MIN_RELOCK_TIMEOUT_MINUTES as i64;
        let relock_timeout_minutes = relock_timeout_minutes.max(floor) as u64;

        Ok(Self {
            pin,
            relock_timeout_minutes,
        })
    }

    pub fn relock_timeout_minutes(&self) -> u64 {
        self.relock_timeout_minutes
    }

    pub fn relock_timeout(&self) -> Duration {
        Duration::from_secs(self.relock_timeout_minutes * 60)
    }

    // Plain equality; attempts are neither throttled nor compared in constant time.
    pub(crate) fn pin_matches(&self, candidate: &str) -> bool {
        candidate == self.pin
    }
}

impl fmt::Debug for LockSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockSettings")
            .field("pin", &"<redacted>")
            .field("relock_timeout_minutes", &self.relock_timeout_minutes)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;

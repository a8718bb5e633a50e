use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use lock_core::{LockSettings, SettingsError};
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "lockd.toml";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pin: String,
    pub relock_timeout_minutes: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pin: "00000000".into(),
            relock_timeout_minutes: 10,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("pin", &"<redacted>")
            .field("relock_timeout_minutes", &self.relock_timeout_minutes)
            .finish()
    }
}

impl Settings {
    pub fn into_lock_settings(self) -> Result<LockSettings, SettingsError> {
        LockSettings::new(self.pin, self.relock_timeout_minutes)
    }
}

/// Defaults, then the settings file, then environment overrides.
///
/// An explicit `path` must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if default_path.exists() {
                read_settings_file(&default_path)?
            } else {
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SETTINGS_LOCK_PIN") {
        settings.pin = v;
    }
    if let Some(v) = lookup("APP__PIN") {
        settings.pin = v;
    }

    for key in ["SETTINGS_LOCK_TIMEOUT_MINUTES", "APP__RELOCK_TIMEOUT_MINUTES"] {
        if let Some(v) = lookup(key) {
            if let Ok(parsed) = v.trim().parse::<i64>() {
                settings.relock_timeout_minutes = parsed;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(PanelId);
id_newtype!(PageId);
id_newtype!(WidgetId);
id_newtype!(FeedbackId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsMenuMode {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetActionType {
    Pressed,
    Released,
    Changed,
    Clicked,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextInputType {
    SingleLine,
    Numeric,
    Password,
    PinCode,
}

/// Access level of the admin surface, as two gates: the hidden panel and the
/// device settings menu.
///
/// `PanelUnlocked` is the window between an accepted PIN and the user
/// pressing "Unlock": the hidden panel may stay open, the settings menu is
/// still locked. `SettingsUnlocked` is the reverse, reached when "Unlock" is
/// pressed without a PIN having been accepted; the hidden panel stays gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    #[default]
    Locked,
    PanelUnlocked,
    SettingsUnlocked,
    Unlocked,
}

impl LockState {
    pub fn from_flags(panel_locked: bool, settings_locked: bool) -> Self {
        match (panel_locked, settings_locked) {
            (true, true) => Self::Locked,
            (false, true) => Self::PanelUnlocked,
            (true, false) => Self::SettingsUnlocked,
            (false, false) => Self::Unlocked,
        }
    }

    pub fn panel_locked(self) -> bool {
        matches!(self, Self::Locked | Self::SettingsUnlocked)
    }

    pub fn settings_locked(self) -> bool {
        matches!(self, Self::Locked | Self::PanelUnlocked)
    }

    /// Opens the panel gate; the settings gate is left as it is.
    pub fn unlock_panel(self) -> Self {
        Self::from_flags(false, self.settings_locked())
    }

    /// Opens the settings gate; the panel gate is left as it is.
    pub fn unlock_settings(self) -> Self {
        Self::from_flags(self.panel_locked(), false)
    }

    pub fn settings_menu_mode(self) -> SettingsMenuMode {
        if self.settings_locked() {
            SettingsMenuMode::Locked
        } else {
            SettingsMenuMode::Unlocked
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;

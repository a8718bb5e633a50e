use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    FeedbackId, PageId, PanelId, SettingsMenuMode, TextInputType, WidgetActionType, WidgetId,
};

/// Events the device UI reports to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum UiEvent {
    WidgetAction {
        widget_id: WidgetId,
        action_type: WidgetActionType,
        #[serde(default)]
        value: String,
    },
    PanelClicked {
        panel_id: PanelId,
    },
    PanelOpened {
        panel_id: PanelId,
    },
    PageClosed {
        page_id: PageId,
    },
    TextInputResponse {
        feedback_id: FeedbackId,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputPrompt {
    pub title: String,
    pub text: String,
    pub feedback_id: FeedbackId,
    pub input_type: TextInputType,
    pub duration_secs: u32,
}

/// Commands the controller issues to the device UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum UiCommand {
    DisplayTextInput(TextInputPrompt),
    OpenPanel {
        panel_id: PanelId,
    },
    ClosePanel,
    SetSettingsMenuMode {
        mode: SettingsMenuMode,
    },
    DisplayAlert {
        title: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_secs: Option<u32>,
    },
    ClearAlert,
    UnsetWidgetValue {
        widget_id: WidgetId,
    },
    SavePanel {
        panel_id: PanelId,
        body: String,
    },
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            UiCommand::DisplayTextInput(_) => "display_text_input",
            UiCommand::OpenPanel { .. } => "open_panel",
            UiCommand::ClosePanel => "close_panel",
            UiCommand::SetSettingsMenuMode { .. } => "set_settings_menu_mode",
            UiCommand::DisplayAlert { .. } => "display_alert",
            UiCommand::ClearAlert => "clear_alert",
            UiCommand::UnsetWidgetValue { .. } => "unset_widget_value",
            UiCommand::SavePanel { .. } => "save_panel",
        }
    }
}

/// Notifications published by the controller after each transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum LockEvent {
    Locked {
        cause: String,
        at: DateTime<Utc>,
    },
    Unlocked {
        cause: String,
        relock_after_minutes: u64,
        at: DateTime<Utc>,
    },
    PinAccepted {
        at: DateTime<Utc>,
    },
    PinRejected {
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;

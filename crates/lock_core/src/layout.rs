//! Identifiers, panel definitions and user-facing text of the admin surface.

use device_ui::panels::{
    GroupButtonValue, PageDefinition, PanelDefinition, PanelLocation, WidgetDefinition,
};
use shared::{
    domain::{FeedbackId, PageId, PanelId, TextInputType, WidgetId},
    protocol::{TextInputPrompt, UiCommand},
};

pub const VISIBLE_PANEL_ID: &str = "settings_admin_visible";
pub const HIDDEN_PANEL_ID: &str = "settings_admin_hidden";
pub const HIDDEN_PAGE_ID: &str = "settings_admin_hidden~panelUI";
pub const LOCK_TOGGLE_WIDGET_ID: &str = "settings_admin_hidden~settingsLock";
pub const PIN_FEEDBACK_ID: &str = "settingsAdminPin";

pub const LOCK_VALUE: &str = "lock";
pub const UNLOCK_VALUE: &str = "unlock";

const PANEL_NAME: &str = "Settings Admin";
const PIN_PROMPT_TITLE: &str = "Enter Super Secret Code";
const PIN_RETRY_TITLE: &str = "Oops, Try Again";
const PIN_PROMPT_TEXT: &str = "Enter the admin pin to unlock the device settings";
const PIN_PROMPT_DURATION_SECS: u32 = 45;
const UNLOCK_BANNER_TITLE: &str = "Settings Menu Unlocked";

/// Entry point shown in the control panel; it has no page of its own.
pub fn visible_panel() -> PanelDefinition {
    PanelDefinition {
        panel_id: PanelId::from(VISIBLE_PANEL_ID),
        name: PANEL_NAME.to_string(),
        icon: "Helpdesk".to_string(),
        location: PanelLocation::ControlPanel,
        page: None,
    }
}

pub fn hidden_panel() -> PanelDefinition {
    PanelDefinition {
        panel_id: PanelId::from(HIDDEN_PANEL_ID),
        name: PANEL_NAME.to_string(),
        icon: "Lightbulb".to_string(),
        location: PanelLocation::Hidden,
        page: Some(PageDefinition {
            page_id: PageId::from(HIDDEN_PAGE_ID),
            name: PANEL_NAME.to_string(),
            rows: vec![
                WidgetDefinition::Text {
                    widget_id: WidgetId::from("settings_admin_hidden~note1"),
                    text: "Pressing Unlock will unlock the Device's Settings.".to_string(),
                },
                WidgetDefinition::Text {
                    widget_id: WidgetId::from("settings_admin_hidden~note2"),
                    text: "Please Lock this back down after you're done making your changes"
                        .to_string(),
                },
                WidgetDefinition::GroupButton {
                    widget_id: WidgetId::from(LOCK_TOGGLE_WIDGET_ID),
                    values: vec![
                        GroupButtonValue {
                            key: LOCK_VALUE.to_string(),
                            name: "Lock".to_string(),
                        },
                        GroupButtonValue {
                            key: UNLOCK_VALUE.to_string(),
                            name: "Unlock".to_string(),
                        },
                    ],
                },
            ],
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptFraming {
    First,
    Retry,
}

pub fn pin_prompt(framing: PromptFraming) -> UiCommand {
    let title = match framing {
        PromptFraming::First => PIN_PROMPT_TITLE,
        PromptFraming::Retry => PIN_RETRY_TITLE,
    };

    UiCommand::DisplayTextInput(TextInputPrompt {
        title: title.to_string(),
        text: PIN_PROMPT_TEXT.to_string(),
        feedback_id: FeedbackId::from(PIN_FEEDBACK_ID),
        input_type: TextInputType::Password,
        duration_secs: PIN_PROMPT_DURATION_SECS,
    })
}

pub fn unlock_banner(relock_after_minutes: u64) -> UiCommand {
    UiCommand::DisplayAlert {
        title: UNLOCK_BANNER_TITLE.to_string(),
        text: format!(
            "You have {relock_after_minutes} minutes to complete your actions before the system relocks itself"
        ),
        // Stays up until the next relock clears it; the countdown is in the text only.
        duration_secs: None,
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;

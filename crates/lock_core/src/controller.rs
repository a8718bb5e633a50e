use std::{future::Future, sync::Arc};

use chrono::Utc;
use device_ui::DeviceUi;
use shared::{
    domain::{
        FeedbackId, LockState, PageId, PanelId, SettingsMenuMode, WidgetActionType, WidgetId,
    },
    protocol::{LockEvent, UiCommand, UiEvent},
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::{
    layout::{
        self, PromptFraming, HIDDEN_PAGE_ID, HIDDEN_PANEL_ID, LOCK_TOGGLE_WIDGET_ID, LOCK_VALUE,
        PIN_FEEDBACK_ID, UNLOCK_VALUE, VISIBLE_PANEL_ID,
    },
    settings::LockSettings,
    timer::RelockScheduler,
};

const CAUSE_STARTUP: &str = "Script Initialization";
const CAUSE_TIMEOUT: &str = "Unlock Timeout to Relock Completed";
const CAUSE_FAILED_PIN: &str = "User Failed Pin Code Entry";
const CAUSE_PAGE_CLOSED: &str = "Settings Admin Page Closed with Unlock Deselected";
const CAUSE_MANUAL_LOCK: &str = "Settings Admin Manually Locked Solution";
const CAUSE_MANUAL_UNLOCK: &str = "Settings Admin Unlocked Solution";

/// One unit of work for the controller loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerInput {
    Ui(UiEvent),
    RelockDue { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutcome {
    Accepted,
    Rejected,
}

/// Single owner of the lock state, the relock timer and the settings-menu
/// mode on the device.
///
/// Every operation takes `&mut self`; [`LockController::run`] feeds UI events
/// and timer expiries through one at a time.
pub struct LockController {
    settings: LockSettings,
    ui: Arc<dyn DeviceUi>,
    state: LockState,
    relock: RelockScheduler,
    ui_events: broadcast::Receiver<UiEvent>,
    timer_inputs: mpsc::UnboundedReceiver<ControllerInput>,
    events: broadcast::Sender<LockEvent>,
}

impl LockController {
    pub fn new(settings: LockSettings, ui: Arc<dyn DeviceUi>) -> Self {
        let (timer_tx, timer_inputs) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(64);
        let ui_events = ui.subscribe_events();

        Self {
            settings,
            ui,
            state: LockState::Locked,
            relock: RelockScheduler::new(timer_tx),
            ui_events,
            timer_inputs,
            events,
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn has_pending_relock(&self) -> bool {
        self.relock.pending_generation().is_some()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<LockEvent> {
        self.events.subscribe()
    }

    /// Declares both panels, then forces the locked state whatever the
    /// device was showing before.
    pub async fn bootstrap(&mut self) {
        for panel in [layout::visible_panel(), layout::hidden_panel()] {
            self.issue(panel.save_command()).await;
        }
        self.request_relock(CAUSE_STARTUP).await;
        info!(
            minutes = self.settings.relock_timeout_minutes(),
            "lock: relock timeout configured"
        );
    }

    /// Handles inputs until the device event stream closes.
    pub async fn run(self) {
        self.run_until(std::future::pending()).await;
    }

    /// Like [`LockController::run`], but also stops once `shutdown`
    /// resolves. UI events already queued are handled before stopping.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let input = tokio::select! {
                biased;
                received = self.ui_events.recv() => match received {
                    Ok(event) => ControllerInput::Ui(event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "lock: ui event stream lagged; events dropped");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        info!("lock: ui event stream closed; controller stopping");
                        break;
                    }
                },
                Some(input) = self.timer_inputs.recv() => input,
                () = &mut shutdown => {
                    info!("lock: shutdown requested; controller stopping");
                    break;
                }
            };

            self.handle_input(input).await;
        }
    }

    pub async fn handle_input(&mut self, input: ControllerInput) {
        match input {
            ControllerInput::Ui(event) => self.handle_event(event).await,
            ControllerInput::RelockDue { generation } => {
                if self.relock.claim(generation) {
                    self.request_relock(CAUSE_TIMEOUT).await;
                } else {
                    debug!(generation, "lock: discarded superseded relock timer");
                }
            }
        }
    }

    pub async fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::WidgetAction {
                widget_id,
                action_type,
                value,
            } => {
                self.handle_widget_action(&widget_id, action_type, &value)
                    .await
            }
            UiEvent::PanelClicked { panel_id } => self.handle_panel_clicked(&panel_id).await,
            UiEvent::PanelOpened { panel_id } => self.handle_panel_opened(&panel_id).await,
            UiEvent::PageClosed { page_id } => self.handle_page_closed(&page_id).await,
            UiEvent::TextInputResponse { feedback_id, text } => {
                self.handle_text_input_response(&feedback_id, &text).await
            }
        }
    }

    /// Idempotent: cancels any pending timer and drives the device back to
    /// the locked layout.
    pub async fn request_relock(&mut self, cause: &str) {
        self.relock.cancel();
        self.state = LockState::Locked;

        self.issue(UiCommand::ClosePanel).await;
        self.issue(UiCommand::SetSettingsMenuMode {
            mode: SettingsMenuMode::Locked,
        })
        .await;
        self.issue(UiCommand::ClearAlert).await;
        self.issue(UiCommand::UnsetWidgetValue {
            widget_id: WidgetId::from(LOCK_TOGGLE_WIDGET_ID),
        })
        .await;

        info!(cause, "lock: settings locked");
        self.publish(LockEvent::Locked {
            cause: cause.to_string(),
            at: Utc::now(),
        });
    }

    pub async fn request_unlock(&mut self, cause: &str) {
        if self.state.panel_locked() {
            warn!(cause, "lock: settings unlocked without pin entry; hidden panel stays locked");
        }
        self.state = self.state.unlock_settings();

        self.issue(UiCommand::SetSettingsMenuMode {
            mode: SettingsMenuMode::Unlocked,
        })
        .await;
        let minutes = self.settings.relock_timeout_minutes();
        let generation = self.relock.schedule(self.settings.relock_timeout());
        self.issue(layout::unlock_banner(minutes)).await;
        self.issue(UiCommand::ClosePanel).await;

        info!(cause, minutes, generation, "lock: settings unlocked");
        self.publish(LockEvent::Unlocked {
            cause: cause.to_string(),
            relock_after_minutes: minutes,
            at: Utc::now(),
        });
    }

    pub async fn submit_pin(&mut self, text: &str) -> PinOutcome {
        if self.settings.pin_matches(text) {
            self.state = self.state.unlock_panel();
            info!("lock: pin accepted");
            self.publish(LockEvent::PinAccepted { at: Utc::now() });
            self.issue(UiCommand::OpenPanel {
                panel_id: PanelId::from(HIDDEN_PANEL_ID),
            })
            .await;
            return PinOutcome::Accepted;
        }

        warn!("lock: pin rejected");
        self.publish(LockEvent::PinRejected { at: Utc::now() });
        self.request_relock(CAUSE_FAILED_PIN).await;
        self.issue(layout::pin_prompt(PromptFraming::Retry)).await;
        PinOutcome::Rejected
    }

    pub async fn handle_panel_clicked(&mut self, panel_id: &PanelId) {
        match panel_id.as_str() {
            VISIBLE_PANEL_ID if self.state.settings_locked() => {
                self.issue(layout::pin_prompt(PromptFraming::First)).await;
            }
            VISIBLE_PANEL_ID => {
                self.issue(UiCommand::OpenPanel {
                    panel_id: PanelId::from(HIDDEN_PANEL_ID),
                })
                .await;
            }
            HIDDEN_PANEL_ID if self.state.panel_locked() => {
                warn!("lock: hidden panel clicked while locked; closing");
                self.issue(UiCommand::ClosePanel).await;
            }
            _ => debug!(%panel_id, "lock: ignored panel click"),
        }
    }

    pub async fn handle_panel_opened(&mut self, panel_id: &PanelId) {
        if panel_id.as_str() == HIDDEN_PANEL_ID && self.state.panel_locked() {
            warn!("lock: hidden panel opened while locked; closing");
            self.issue(UiCommand::ClosePanel).await;
        }
    }

    pub async fn handle_page_closed(&mut self, page_id: &PageId) {
        if page_id.as_str() == HIDDEN_PAGE_ID && self.state.settings_locked() {
            self.request_relock(CAUSE_PAGE_CLOSED).await;
        }
    }

    pub async fn handle_widget_action(
        &mut self,
        widget_id: &WidgetId,
        action_type: WidgetActionType,
        value: &str,
    ) {
        if action_type != WidgetActionType::Released || widget_id.as_str() != LOCK_TOGGLE_WIDGET_ID
        {
            return;
        }

        match value {
            LOCK_VALUE => self.request_relock(CAUSE_MANUAL_LOCK).await,
            UNLOCK_VALUE => self.request_unlock(CAUSE_MANUAL_UNLOCK).await,
            other => debug!(value = other, "lock: ignored lock toggle value"),
        }
    }

    pub async fn handle_text_input_response(&mut self, feedback_id: &FeedbackId, text: &str) {
        if feedback_id.as_str() == PIN_FEEDBACK_ID {
            self.submit_pin(text).await;
        } else {
            debug!(%feedback_id, "lock: ignored text input response");
        }
    }

    // Fire-and-forget: a failed command is logged and the state is kept, so
    // the device can drift from `self.state` until the next relock.
    async fn issue(&mut self, command: UiCommand) {
        let name = command.name();
        if let Err(error) = self.ui.send_command(command).await {
            warn!(command = name, %error, "lock: ui command failed");
        }
    }

    fn publish(&self, event: LockEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

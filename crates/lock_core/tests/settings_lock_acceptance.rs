use std::{sync::Arc, time::Duration};

use device_ui::RecordingDeviceUi;
use lock_core::{
    layout::{
        self, PromptFraming, HIDDEN_PANEL_ID, LOCK_TOGGLE_WIDGET_ID, PIN_FEEDBACK_ID,
        VISIBLE_PANEL_ID,
    },
    LockController, LockSettings,
};
use shared::{
    domain::{FeedbackId, LockState, PanelId, SettingsMenuMode, WidgetActionType, WidgetId},
    protocol::{LockEvent, UiCommand, UiEvent},
};
use tokio::{sync::broadcast, time::Instant};

async fn wait_for_command(ui: &RecordingDeviceUi, expected: &UiCommand) {
    for _ in 0..100 {
        if ui.commands().await.contains(expected) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("command never issued: {expected:?}");
}

async fn next_event(events: &mut broadcast::Receiver<LockEvent>) -> LockEvent {
    events.recv().await.expect("lock event")
}

fn pin_response(text: &str) -> UiEvent {
    UiEvent::TextInputResponse {
        feedback_id: FeedbackId::from(PIN_FEEDBACK_ID),
        text: text.to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn pin_unlock_and_timed_relock_acceptance() {
    let ui = Arc::new(RecordingDeviceUi::new());
    let settings = LockSettings::new("00000000", 10).expect("settings");
    let mut controller = LockController::new(settings, ui.clone());
    let mut events = controller.subscribe_events();

    controller.bootstrap().await;
    assert_eq!(controller.state(), LockState::Locked);
    assert!(matches!(next_event(&mut events).await, LockEvent::Locked { .. }));
    ui.take_commands().await;

    let run = tokio::spawn(controller.run());

    ui.emit(UiEvent::PanelClicked {
        panel_id: PanelId::from(VISIBLE_PANEL_ID),
    });
    wait_for_command(&ui, &layout::pin_prompt(PromptFraming::First)).await;

    ui.emit(pin_response("12345678"));
    assert!(matches!(next_event(&mut events).await, LockEvent::PinRejected { .. }));
    match next_event(&mut events).await {
        LockEvent::Locked { cause, .. } => assert_eq!(cause, "User Failed Pin Code Entry"),
        other => panic!("unexpected event {other:?}"),
    }
    wait_for_command(&ui, &layout::pin_prompt(PromptFraming::Retry)).await;
    ui.take_commands().await;

    ui.emit(pin_response("00000000"));
    assert!(matches!(next_event(&mut events).await, LockEvent::PinAccepted { .. }));
    let open_hidden = UiCommand::OpenPanel {
        panel_id: PanelId::from(HIDDEN_PANEL_ID),
    };
    wait_for_command(&ui, &open_hidden).await;

    ui.emit(UiEvent::PanelOpened {
        panel_id: PanelId::from(HIDDEN_PANEL_ID),
    });
    ui.emit(UiEvent::WidgetAction {
        widget_id: WidgetId::from(LOCK_TOGGLE_WIDGET_ID),
        action_type: WidgetActionType::Released,
        value: "unlock".to_string(),
    });
    let unlocked_at = Instant::now();
    match next_event(&mut events).await {
        LockEvent::Unlocked {
            relock_after_minutes,
            ..
        } => assert_eq!(relock_after_minutes, 10),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(
        ui.take_commands().await,
        vec![
            open_hidden,
            UiCommand::SetSettingsMenuMode {
                mode: SettingsMenuMode::Unlocked,
            },
            layout::unlock_banner(10),
            UiCommand::ClosePanel,
        ]
    );

    match next_event(&mut events).await {
        LockEvent::Locked { cause, .. } => {
            assert_eq!(cause, "Unlock Timeout to Relock Completed")
        }
        other => panic!("unexpected event {other:?}"),
    }
    let waited = unlocked_at.elapsed();
    assert!(
        waited >= Duration::from_secs(600) && waited < Duration::from_secs(601),
        "relocked after {waited:?}"
    );
    assert!(ui.commands().await.contains(&UiCommand::UnsetWidgetValue {
        widget_id: WidgetId::from(LOCK_TOGGLE_WIDGET_ID),
    }));

    run.abort();
}

#[tokio::test(start_paused = true)]
async fn out_of_band_hidden_panel_open_is_closed_by_run_loop() {
    let ui = Arc::new(RecordingDeviceUi::new());
    let settings = LockSettings::new("00000000", 10).expect("settings");
    let controller = LockController::new(settings, ui.clone());
    let run = tokio::spawn(controller.run());

    ui.emit(UiEvent::PanelOpened {
        panel_id: PanelId::from(HIDDEN_PANEL_ID),
    });
    wait_for_command(&ui, &UiCommand::ClosePanel).await;
    assert_eq!(ui.commands().await, vec![UiCommand::ClosePanel]);

    run.abort();
}

use super::*;
use serde_json::json;

#[test]
fn ui_event_uses_adjacent_type_tag() {
    let raw = json!({
        "type": "widget_action",
        "payload": {
            "widget_id": "settings_admin_hidden~settingsLock",
            "action_type": "released",
            "value": "unlock"
        }
    });

    let event: UiEvent = serde_json::from_value(raw).expect("decode");
    assert_eq!(
        event,
        UiEvent::WidgetAction {
            widget_id: WidgetId::from("settings_admin_hidden~settingsLock"),
            action_type: WidgetActionType::Released,
            value: "unlock".to_string(),
        }
    );
}

#[test]
fn unknown_widget_action_type_maps_to_other() {
    let raw = json!({
        "type": "widget_action",
        "payload": { "widget_id": "w", "action_type": "long_pressed" }
    });

    let event: UiEvent = serde_json::from_value(raw).expect("decode");
    match event {
        UiEvent::WidgetAction {
            action_type, value, ..
        } => {
            assert_eq!(action_type, WidgetActionType::Other);
            assert!(value.is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn unit_command_serializes_without_payload() {
    let value = serde_json::to_value(UiCommand::ClosePanel).expect("encode");
    assert_eq!(value, json!({ "type": "close_panel" }));
}

#[test]
fn alert_without_duration_omits_field() {
    let value = serde_json::to_value(UiCommand::DisplayAlert {
        title: "t".into(),
        text: "b".into(),
        duration_secs: None,
    })
    .expect("encode");
    assert_eq!(
        value,
        json!({ "type": "display_alert", "payload": { "title": "t", "text": "b" } })
    );
}

#[test]
fn command_names_match_wire_tags() {
    let commands = [
        UiCommand::ClosePanel,
        UiCommand::ClearAlert,
        UiCommand::OpenPanel {
            panel_id: PanelId::from("p"),
        },
        UiCommand::SetSettingsMenuMode {
            mode: SettingsMenuMode::Locked,
        },
        UiCommand::UnsetWidgetValue {
            widget_id: WidgetId::from("w"),
        },
    ];

    for command in commands {
        let value = serde_json::to_value(&command).expect("encode");
        assert_eq!(value["type"], command.name());
    }
}

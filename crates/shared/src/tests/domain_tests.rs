use super::*;

#[test]
fn lock_state_defaults_to_locked() {
    let state = LockState::default();
    assert_eq!(state, LockState::Locked);
    assert!(state.panel_locked());
    assert!(state.settings_locked());
    assert_eq!(state.settings_menu_mode(), SettingsMenuMode::Locked);
}

#[test]
fn panel_unlocked_keeps_settings_locked() {
    let state = LockState::PanelUnlocked;
    assert!(!state.panel_locked());
    assert!(state.settings_locked());
    assert_eq!(state.settings_menu_mode(), SettingsMenuMode::Locked);
}

#[test]
fn unlocked_opens_both_gates() {
    let state = LockState::Unlocked;
    assert!(!state.panel_locked());
    assert!(!state.settings_locked());
    assert_eq!(state.settings_menu_mode(), SettingsMenuMode::Unlocked);
}

#[test]
fn settings_unlocked_keeps_panel_locked() {
    let state = LockState::SettingsUnlocked;
    assert!(state.panel_locked());
    assert!(!state.settings_locked());
    assert_eq!(state.settings_menu_mode(), SettingsMenuMode::Unlocked);
}

#[test]
fn each_gate_opens_independently() {
    assert_eq!(LockState::Locked.unlock_settings(), LockState::SettingsUnlocked);
    assert_eq!(LockState::Locked.unlock_panel(), LockState::PanelUnlocked);
    assert_eq!(LockState::SettingsUnlocked.unlock_panel(), LockState::Unlocked);
    assert_eq!(LockState::PanelUnlocked.unlock_settings(), LockState::Unlocked);
    assert_eq!(LockState::Unlocked.unlock_panel(), LockState::Unlocked);
    assert_eq!(
        LockState::SettingsUnlocked.unlock_settings(),
        LockState::SettingsUnlocked
    );
}

#[test]
fn from_flags_matches_gate_accessors() {
    for state in [
        LockState::Locked,
        LockState::PanelUnlocked,
        LockState::SettingsUnlocked,
        LockState::Unlocked,
    ] {
        assert_eq!(
            LockState::from_flags(state.panel_locked(), state.settings_locked()),
            state
        );
    }
}

#[test]
fn id_newtypes_display_raw_value() {
    let panel = PanelId::from("settings_admin_hidden");
    assert_eq!(panel.to_string(), "settings_admin_hidden");
    assert_eq!(panel.as_str(), "settings_admin_hidden");
    assert_eq!(panel, PanelId::new("settings_admin_hidden".to_string()));
}

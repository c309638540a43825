use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::map::ObstacleKind;

use super::params::{is_cursor_over_ui, is_typing};
use super::session::EditSession;
use super::state::EditorState;

/// Obstacle kind selected by a number key
pub fn kind_for_key(key: KeyCode) -> Option<ObstacleKind> {
    match key {
        KeyCode::Digit1 | KeyCode::Numpad1 => Some(ObstacleKind::Box),
        KeyCode::Digit2 | KeyCode::Numpad2 => Some(ObstacleKind::Arch),
        KeyCode::Digit3 | KeyCode::Numpad3 => Some(ObstacleKind::Flag),
        _ => None,
    }
}

/// Cursor for the canvas given the session state
pub fn canvas_cursor(session: &EditSession) -> CursorIcon {
    if let Some(icon) = session.drag_mode().cursor_icon() {
        return icon;
    }
    if session.placement_mode() {
        CursorIcon::System(SystemCursorIcon::Crosshair)
    } else {
        CursorIcon::System(SystemCursorIcon::Default)
    }
}

pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<EditorState>,
    mut contexts: EguiContexts,
) {
    // Don't change tools if typing in a text field
    if is_typing(&mut contexts) {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        state.toggle_placement_mode();
    }

    if let Some(kind) = keyboard.get_just_pressed().find_map(|key| kind_for_key(*key)) {
        state.set_obstacle_kind(kind);
    }
}

pub fn update_cursor_icon(
    state: Res<EditorState>,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(entity) = window_query.single() else {
        return;
    };

    // Use default cursor over UI, session cursor in editor space
    if !state.session.drag_mode().is_active() && is_cursor_over_ui(&mut contexts) {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    commands.entity(entity).insert(canvas_cursor(&state.session));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_choose_kind() {
        assert_eq!(kind_for_key(KeyCode::Digit1), Some(ObstacleKind::Box));
        assert_eq!(kind_for_key(KeyCode::Digit2), Some(ObstacleKind::Arch));
        assert_eq!(kind_for_key(KeyCode::Numpad3), Some(ObstacleKind::Flag));
        assert_eq!(kind_for_key(KeyCode::Digit4), None);
    }

    #[test]
    fn test_display_names_contain_shortcuts() {
        for kind in ObstacleKind::all() {
            let name = kind.display_name();
            assert!(name.contains('('), "Display name should contain shortcut: {}", name);
        }
    }

    #[test]
    fn test_idle_cursor_is_default() {
        assert_eq!(
            canvas_cursor(&EditSession::default()),
            CursorIcon::System(SystemCursorIcon::Default)
        );
    }

    #[test]
    fn test_placement_cursor_is_crosshair() {
        let mut session = EditSession::default();
        session.toggle_placement_mode();
        assert_eq!(
            canvas_cursor(&session),
            CursorIcon::System(SystemCursorIcon::Crosshair)
        );
    }
}

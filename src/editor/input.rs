//! Forwards mouse and keyboard input to the editor state.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::params::{is_cursor_over_ui, is_typing, CameraParams};
use super::session::{EditKey, PointerDownOutcome};
use super::state::EditorState;

/// Ends a drag or resize. Runs even while a dialog is open so a release
/// under a modal is not lost.
pub fn release_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut state: ResMut<EditorState>,
) {
    if mouse_button.just_released(MouseButton::Left) {
        state.pointer_up();
    }
}

pub fn handle_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    camera: CameraParams,
    mut state: ResMut<EditorState>,
    mut contexts: EguiContexts,
) {
    if mouse_button.just_released(MouseButton::Left) {
        return;
    }

    let dragging = state.session.drag_mode().is_active();
    let pressed = mouse_button.just_pressed(MouseButton::Left);
    if !pressed && !dragging {
        return;
    }

    // Clicks on panels belong to egui; drags keep following the pointer
    if pressed && is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(world_pos) = camera.cursor_world_pos() else {
        return;
    };

    if pressed {
        match state.pointer_down(world_pos) {
            PointerDownOutcome::Background { marker: Some(index) } => {
                debug!("Selected marker #{}", index);
            }
            PointerDownOutcome::ResizeStarted { index, handle } => {
                debug!("Resizing obstacle #{} with handle {}", index, handle);
            }
            _ => {}
        }
    } else {
        state.pointer_move(world_pos);
    }
}

pub fn handle_edit_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<EditorState>,
    mut contexts: EguiContexts,
) {
    // Don't trigger if typing in UI
    if is_typing(&mut contexts) {
        return;
    }

    if keyboard.just_pressed(KeyCode::Delete) || keyboard.just_pressed(KeyCode::Backspace) {
        state.key_press(EditKey::Delete);
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        state.key_press(EditKey::Escape);
    }
}

mod control_panel;
mod dialogs;
mod marker_editor;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::{ConfigLoaded, ConfigResetNotification};
use crate::map::{AsyncFileOperation, UserNotice};

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    marker_editor: Res<marker_editor::MarkerEditorState>,
    notice: Res<UserNotice>,
    config_reset: Res<ConfigResetNotification>,
    async_op: Res<AsyncFileOperation>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = marker_editor.open
        || notice.current.is_some()
        || config_reset.show
        || async_op.is_busy();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<control_panel::ControlPanelState>()
            .init_resource::<marker_editor::MarkerEditorState>()
            .add_systems(
                Startup,
                control_panel::init_height_from_config.after(ConfigLoaded),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Side panel first so windows lay out over the remaining area
                    control_panel::control_panel_ui,
                    marker_editor::marker_editor_ui,
                    dialogs::config_reset_notification_ui,
                    dialogs::notice_ui,
                    dialogs::async_operation_modal_ui,
                )
                    .chain(),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}

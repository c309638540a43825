//! Notices, the file operation modal, and native file pickers.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use std::path::PathBuf;

use crate::config::ConfigResetNotification;
use crate::map::{AsyncFileOperation, UserNotice};
use crate::theme;

/// Native file dialog with one extension filter, opened in `directory` when known.
pub(super) fn file_dialog(
    title: &str,
    filter_name: &str,
    extension: &str,
    directory: Option<PathBuf>,
) -> rfd::FileDialog {
    let dialog = rfd::FileDialog::new()
        .set_title(title)
        .add_filter(filter_name, &[extension]);
    match directory {
        Some(dir) => dialog.set_directory(dir),
        None => dialog,
    }
}

/// Error and info notices, one at a time until dismissed
pub fn notice_ui(mut contexts: EguiContexts, mut notice: ResMut<UserNotice>) -> Result {
    let Some(current) = notice.current.clone() else {
        return Ok(());
    };

    let mut dismissed = false;

    egui::Window::new(current.title.as_str())
        .id(egui::Id::new("user_notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.set_min_width(280.0);
            ui.colored_label(theme::notice_text_color(current.level), current.message.as_str());
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        notice.current = None;
    }

    Ok(())
}

/// Blocking modal while a file task runs
pub fn async_operation_modal_ui(
    mut contexts: EguiContexts,
    async_op: Res<AsyncFileOperation>,
) -> Result {
    if !async_op.is_busy() {
        return Ok(());
    }

    let title = if async_op.is_saving { "Saving" } else { "Loading" };
    let description = async_op
        .operation_description
        .as_deref()
        .unwrap_or("Working...");

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(description);
            });
        });

    Ok(())
}

/// Tells the operator the config file was unreadable and defaults were used
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    let mut dismissed = false;

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.set_min_width(320.0);
            ui.colored_label(
                theme::WARNING_TEXT,
                "The settings file could not be read and was reset to defaults.",
            );
            if let Some(reason) = &notification.reason {
                ui.add_space(4.0);
                ui.label(reason.as_str());
            }
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        notification.show = false;
        notification.reason = None;
    }

    Ok(())
}

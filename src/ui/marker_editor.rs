//! Marker table window.
//!
//! Edits happen on a working copy of the marker map. Closing the window
//! applies the copy to the live map; Export writes the copy as map text.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::{AppConfig, PathKind};
use crate::editor::EditorState;
use crate::error::PlannerError;
use crate::map::{AsyncFileOperation, ExportMapRequest, Marker, MarkerMap};
use crate::theme;

use super::dialogs::file_dialog;

/// Text fields of the add/edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerForm {
    pub id: String,
    pub x: String,
    pub y: String,
    pub length: String,
}

fn parse_field<T: std::str::FromStr>(name: &str, text: &str) -> crate::error::Result<T> {
    text.trim()
        .parse()
        .map_err(|_| PlannerError::format(format!("invalid {} '{}'", name, text.trim())))
}

impl MarkerForm {
    pub fn from_marker(marker: &Marker) -> Self {
        Self {
            id: marker.id.to_string(),
            x: marker.x.to_string(),
            y: marker.y.to_string(),
            length: marker.length.to_string(),
        }
    }

    /// Parsed `(id, x, y, length)`
    pub fn parse(&self) -> crate::error::Result<(i32, f32, f32, f32)> {
        Ok((
            parse_field("id", &self.id)?,
            parse_field("x", &self.x)?,
            parse_field("y", &self.y)?,
            parse_field("length", &self.length)?,
        ))
    }
}

/// Apply the form to the working copy, returning the row it landed on.
///
/// `editing: None` adds a planar marker. Editing keeps the existing z and
/// rotations and only replaces id, x, y and length.
pub fn apply_form(
    working: &mut MarkerMap,
    editing: Option<usize>,
    form: &MarkerForm,
) -> crate::error::Result<usize> {
    let (id, x, y, length) = form.parse()?;
    match editing {
        None => {
            working.add(Marker::planar(id, x, y, length))?;
            Ok(working.len() - 1)
        }
        Some(index) => {
            let existing = working.get(index).cloned().ok_or_else(|| {
                PlannerError::validation(format!("no marker at index {}", index))
            })?;
            working.update(
                index,
                Marker {
                    id,
                    x,
                    y,
                    length,
                    ..existing
                },
            )?;
            Ok(index)
        }
    }
}

#[derive(Debug, Clone)]
struct OpenForm {
    editing: Option<usize>,
    fields: MarkerForm,
}

#[derive(Resource, Default)]
pub struct MarkerEditorState {
    pub open: bool,
    pub working: MarkerMap,
    pub selected_row: Option<usize>,
    form: Option<OpenForm>,
    pub error: Option<String>,
}

impl MarkerEditorState {
    pub fn open_with(&mut self, markers: &MarkerMap) {
        self.open = true;
        self.working = markers.clone();
        self.selected_row = None;
        self.form = None;
        self.error = None;
    }

    pub fn start_add(&mut self) {
        self.form = Some(OpenForm {
            editing: None,
            fields: MarkerForm::default(),
        });
        self.error = None;
    }

    pub fn start_edit(&mut self) {
        let Some(index) = self.selected_row else {
            return;
        };
        if let Some(marker) = self.working.get(index) {
            self.form = Some(OpenForm {
                editing: Some(index),
                fields: MarkerForm::from_marker(marker),
            });
            self.error = None;
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(index) = self.selected_row.take()
            && let Some(marker) = self.working.remove(index)
        {
            debug!("Removed marker {} from working copy", marker.id);
        }
        self.form = None;
    }

    /// Commit the open form. The form stays open with an error on failure.
    pub fn submit_form(&mut self) {
        let Some(form) = &self.form else {
            return;
        };
        match apply_form(&mut self.working, form.editing, &form.fields) {
            Ok(row) => {
                self.selected_row = Some(row);
                self.form = None;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Close the window and hand back the working copy.
    pub fn close(&mut self) -> MarkerMap {
        self.open = false;
        self.form = None;
        self.error = None;
        self.selected_row = None;
        std::mem::take(&mut self.working)
    }
}

fn marker_table(ui: &mut egui::Ui, markers: &MarkerMap, selected: Option<usize>) -> Option<usize> {
    let mut clicked = None;
    egui::ScrollArea::vertical()
        .max_height(260.0)
        .show(ui, |ui| {
            egui::Grid::new("marker_table")
                .striped(true)
                .num_columns(4)
                .show(ui, |ui| {
                    ui.strong("ID");
                    ui.strong("X");
                    ui.strong("Y");
                    ui.strong("Length");
                    ui.end_row();

                    for (index, marker) in markers.markers().iter().enumerate() {
                        if ui
                            .selectable_label(selected == Some(index), marker.id.to_string())
                            .clicked()
                        {
                            clicked = Some(index);
                        }
                        ui.label(format!("{:.2}", marker.x));
                        ui.label(format!("{:.2}", marker.y));
                        ui.label(format!("{:.2}", marker.length));
                        ui.end_row();
                    }
                });
        });
    clicked
}

/// Returns (submit, cancel)
fn form_ui(ui: &mut egui::Ui, form: &mut OpenForm) -> (bool, bool) {
    ui.separator();
    ui.label(if form.editing.is_some() {
        "Edit marker"
    } else {
        "New marker"
    });

    egui::Grid::new("marker_form").num_columns(2).show(ui, |ui| {
        for (label, field) in [
            ("ID:", &mut form.fields.id),
            ("X:", &mut form.fields.x),
            ("Y:", &mut form.fields.y),
            ("Length:", &mut form.fields.length),
        ] {
            ui.label(label);
            ui.text_edit_singleline(field);
            ui.end_row();
        }
    });

    let mut submit = false;
    let mut cancel = false;
    ui.horizontal(|ui| {
        submit = ui.button("Save").clicked();
        cancel = ui.button("Cancel").clicked();
    });
    (submit, cancel)
}

pub fn marker_editor_ui(
    mut contexts: EguiContexts,
    mut editor: ResMut<MarkerEditorState>,
    mut state: ResMut<EditorState>,
    config: Res<AppConfig>,
    async_op: Res<AsyncFileOperation>,
    mut export_events: MessageWriter<ExportMapRequest>,
) -> Result {
    if !editor.open {
        return Ok(());
    }

    let editor = &mut *editor;
    let mut window_open = true;
    let mut close_clicked = false;

    egui::Window::new("Marker Editor")
        .open(&mut window_open)
        .collapsible(false)
        .resizable(true)
        .default_width(380.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(format!("{} markers", editor.working.len()));

            if let Some(row) = marker_table(ui, &editor.working, editor.selected_row) {
                editor.selected_row = Some(row);
            }

            ui.separator();

            let has_selection = editor.selected_row.is_some();
            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    editor.start_add();
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Edit"))
                    .clicked()
                {
                    editor.start_edit();
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new("Delete"))
                    .clicked()
                {
                    editor.delete_selected();
                }
            });

            if let Some(form) = &mut editor.form {
                let (submit, cancel) = form_ui(ui, form);
                if submit {
                    editor.submit_form();
                } else if cancel {
                    editor.form = None;
                    editor.error = None;
                }
            }

            if let Some(error) = &editor.error {
                ui.colored_label(theme::ERROR_TEXT, error.as_str());
            }

            ui.separator();

            ui.horizontal(|ui| {
                let can_export = !editor.working.is_empty() && !async_op.is_busy();
                if ui
                    .add_enabled(can_export, egui::Button::new("Export..."))
                    .clicked()
                    && let Some(path) = file_dialog(
                        "Export Marker Map",
                        "Marker Map",
                        "txt",
                        config.data.dialog_directory(PathKind::Map),
                    )
                    .set_file_name("map.txt")
                    .save_file()
                {
                    export_events.write(ExportMapRequest {
                        path,
                        markers: editor.working.clone(),
                    });
                }

                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
            });
        });

    if !window_open || close_clicked {
        let markers = editor.close();
        info!("Applied marker editor changes ({} markers)", markers.len());
        state.replace_markers(markers);
    }

    Ok(())
}

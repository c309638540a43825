use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::{AppConfig, PathKind};
use crate::constants::{DEFAULT_WAYPOINT_HEIGHT, PROJECT_EXTENSION};
use crate::editor::{EditorState, GridSettings};
use crate::editor::session::EditKey;
use crate::error::PlannerError;
use crate::map::{
    AsyncFileOperation, CurrentProjectFile, LoadMapRequest, LoadPlanRequest, LoadProjectRequest,
    Notice, ObstacleKind, SavePlanRequest, SaveProjectRequest, UserNotice,
};
use crate::theme;

use super::dialogs::file_dialog;
use super::marker_editor::MarkerEditorState;

/// Waypoint buttons of the flight plan section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointAction {
    Add,
    InsertBefore,
    InsertAfter,
    Remove,
    Clear,
}

pub fn parse_height(text: &str) -> crate::error::Result<f32> {
    let trimmed = text.trim();
    trimmed
        .parse::<f32>()
        .ok()
        .filter(|h| h.is_finite())
        .ok_or_else(|| PlannerError::validation(format!("invalid height '{}'", trimmed)))
}

#[derive(Resource)]
pub struct ControlPanelState {
    /// Height entry, pre-filled from the config
    pub height_text: String,
    /// Row selected in the plan list
    pub plan_selection: Option<usize>,
}

impl Default for ControlPanelState {
    fn default() -> Self {
        Self {
            height_text: DEFAULT_WAYPOINT_HEIGHT.to_string(),
            plan_selection: None,
        }
    }
}

impl ControlPanelState {
    fn selected_row(&self) -> crate::error::Result<usize> {
        self.plan_selection
            .ok_or_else(|| PlannerError::validation("select a waypoint in the list first"))
    }

    /// Run one waypoint button against the editor state. The list selection
    /// follows the waypoint that was added or the neighbour of one removed.
    pub fn apply(
        &mut self,
        action: WaypointAction,
        state: &mut EditorState,
    ) -> crate::error::Result<()> {
        match action {
            WaypointAction::Add => {
                let height = parse_height(&self.height_text)?;
                self.plan_selection = Some(state.add_waypoint(height)?);
            }
            WaypointAction::InsertBefore | WaypointAction::InsertAfter => {
                let row = self.selected_row()?;
                let height = parse_height(&self.height_text)?;
                let before = action == WaypointAction::InsertBefore;
                self.plan_selection = Some(state.insert_waypoint(row, height, before)?);
            }
            WaypointAction::Remove => {
                let row = self.selected_row()?;
                state.remove_waypoint(row).ok_or_else(|| {
                    PlannerError::validation(format!("no waypoint at index {}", row))
                })?;
                let remaining = state.plan.len();
                self.plan_selection = (remaining > 0).then(|| row.min(remaining - 1));
            }
            WaypointAction::Clear => {
                state.clear_waypoints();
                self.plan_selection = None;
            }
        }
        Ok(())
    }

    /// Drop a selection that no longer points into the plan (after a load).
    pub fn clamp_selection(&mut self, plan_len: usize) {
        if self.plan_selection.is_some_and(|row| row >= plan_len) {
            self.plan_selection = None;
        }
    }
}

/// Pre-fill the height entry once the config is loaded
pub fn init_height_from_config(config: Res<AppConfig>, mut panel: ResMut<ControlPanelState>) {
    panel.height_text = config.data.default_height.to_string();
}

fn file_name_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn map_section(
    ui: &mut egui::Ui,
    state: &EditorState,
    config: &AppConfig,
    marker_editor: &mut MarkerEditorState,
    load_map: &mut MessageWriter<LoadMapRequest>,
) {
    ui.heading("Map");

    ui.horizontal(|ui| {
        if ui.button("Load Map...").clicked()
            && let Some(path) = file_dialog(
                "Load Marker Map",
                "Marker Map",
                "txt",
                config.data.dialog_directory(PathKind::Map),
            )
            .pick_file()
        {
            load_map.write(LoadMapRequest { path });
        }

        if ui.button("Edit Markers...").clicked() {
            marker_editor.open_with(&state.markers);
        }
    });

    ui.label(format!("{} markers loaded", state.markers.len()));

    match state
        .session
        .selected_marker()
        .and_then(|index| state.markers.get(index))
    {
        Some(marker) => ui.label(format!(
            "Marker {} at ({:.2}, {:.2})",
            marker.id, marker.x, marker.y
        )),
        None => ui.weak("No marker selected"),
    };
}

fn obstacle_section(ui: &mut egui::Ui, state: &mut EditorState) {
    ui.heading("Obstacles");

    let placing = state.session.placement_mode();
    let toggle_label = if placing {
        "Placement: On (P)"
    } else {
        "Placement: Off (P)"
    };
    if ui.selectable_label(placing, toggle_label).clicked() {
        state.toggle_placement_mode();
    }
    if placing {
        ui.colored_label(theme::PLACEMENT_ACTIVE_TEXT, "Click the map to place");
    }

    let current = state.session.obstacle_kind();
    for kind in ObstacleKind::all() {
        if ui.radio(current == *kind, kind.display_name()).clicked() {
            state.set_obstacle_kind(*kind);
        }
    }

    ui.label(format!("{} obstacles", state.obstacles.len()));

    if let Some(index) = state.session.selected_obstacle()
        && let Some(obstacle) = state.obstacles.get(index).copied()
    {
        let position = obstacle.position();
        ui.horizontal(|ui| {
            ui.label(format!(
                "{} at ({:.2}, {:.2})",
                obstacle.kind().display_name(),
                position.x,
                position.y
            ));
            if ui.small_button("Delete").clicked() {
                state.key_press(EditKey::Delete);
            }
        });
    }
}

fn plan_section(
    ui: &mut egui::Ui,
    panel: &mut ControlPanelState,
    state: &mut EditorState,
    notice: &mut UserNotice,
) {
    ui.heading("Flight Plan");

    ui.horizontal(|ui| {
        ui.label("Height:");
        ui.add(egui::TextEdit::singleline(&mut panel.height_text).desired_width(60.0));
    });

    let mut action = None;
    ui.horizontal_wrapped(|ui| {
        for (label, candidate) in [
            ("Add", WaypointAction::Add),
            ("Insert Before", WaypointAction::InsertBefore),
            ("Insert After", WaypointAction::InsertAfter),
            ("Remove", WaypointAction::Remove),
            ("Clear", WaypointAction::Clear),
        ] {
            if ui.button(label).clicked() {
                action = Some(candidate);
            }
        }
    });

    if let Some(action) = action
        && let Err(e) = panel.apply(action, state)
    {
        warn!("Waypoint {:?} failed: {}", action, e);
        notice.current = Some(Notice::error("Flight plan", e.to_string()));
    }

    panel.clamp_selection(state.plan.len());

    egui::ScrollArea::vertical()
        .id_salt("plan_list")
        .max_height(220.0)
        .show(ui, |ui| {
            if state.plan.is_empty() {
                ui.weak("No waypoints");
            }
            for (row, label) in state.plan.list_labels().into_iter().enumerate() {
                let selected = panel.plan_selection == Some(row);
                if ui
                    .selectable_label(selected, format!("{}. {}", row + 1, label))
                    .clicked()
                {
                    panel.plan_selection = if selected { None } else { Some(row) };
                }
            }
        });
}

#[allow(clippy::too_many_arguments)]
pub fn control_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<ControlPanelState>,
    mut state: ResMut<EditorState>,
    mut marker_editor: ResMut<MarkerEditorState>,
    mut notice: ResMut<UserNotice>,
    mut grid: ResMut<GridSettings>,
    config: Res<AppConfig>,
    async_op: Res<AsyncFileOperation>,
    current_project: Res<CurrentProjectFile>,
    mut load_map: MessageWriter<LoadMapRequest>,
    mut plan_requests: (MessageWriter<LoadPlanRequest>, MessageWriter<SavePlanRequest>),
    mut project_requests: (
        MessageWriter<LoadProjectRequest>,
        MessageWriter<SaveProjectRequest>,
    ),
) -> Result {
    let busy = async_op.is_busy();

    egui::SidePanel::left("control_panel")
        .default_width(260.0)
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                // Edits would race the running file task
                ui.add_enabled_ui(!busy, |ui| {
                    map_section(ui, &state, &config, &mut marker_editor, &mut load_map);
                    ui.checkbox(&mut grid.visible, "Show grid");

                    ui.separator();
                    obstacle_section(ui, &mut state);

                    ui.separator();
                    plan_section(ui, &mut panel, &mut state, &mut notice);

                    ui.horizontal(|ui| {
                        if ui.button("Load Plan...").clicked()
                            && let Some(path) = file_dialog(
                                "Load Flight Plan",
                                "Flight Plan",
                                "txt",
                                config.data.dialog_directory(PathKind::Plan),
                            )
                            .pick_file()
                        {
                            plan_requests.0.write(LoadPlanRequest { path });
                        }

                        if ui.button("Save Plan...").clicked()
                            && let Some(path) = file_dialog(
                                "Save Flight Plan",
                                "Flight Plan",
                                "txt",
                                config.data.dialog_directory(PathKind::Plan),
                            )
                            .set_file_name("plan.txt")
                            .save_file()
                        {
                            plan_requests.1.write(SavePlanRequest { path });
                        }
                    });

                    ui.separator();
                    ui.heading("Project");

                    match &current_project.path {
                        Some(path) => ui.label(file_name_label(path)),
                        None => ui.weak("Unsaved project"),
                    };

                    ui.horizontal(|ui| {
                        if ui.button("Load Project...").clicked()
                            && let Some(path) = file_dialog(
                                "Load Project",
                                "ArUco Project",
                                PROJECT_EXTENSION,
                                config.data.dialog_directory(PathKind::Project),
                            )
                            .pick_file()
                        {
                            project_requests.0.write(LoadProjectRequest { path });
                        }

                        if ui.button("Save Project...").clicked() {
                            let file_name = current_project
                                .path
                                .as_deref()
                                .map(file_name_label)
                                .unwrap_or_else(|| format!("project.{}", PROJECT_EXTENSION));
                            let directory = config
                                .data
                                .dialog_directory(PathKind::Project)
                                .unwrap_or_else(crate::paths::projects_dir);
                            if let Some(path) = file_dialog(
                                "Save Project",
                                "ArUco Project",
                                PROJECT_EXTENSION,
                                Some(directory),
                            )
                            .set_file_name(file_name)
                            .save_file()
                            {
                                project_requests.1.write(SaveProjectRequest { path });
                            }
                        }
                    });

                    if !config.data.recent_projects.is_empty() {
                        ui.label("Recent:");
                        for path in &config.data.recent_projects {
                            if ui
                                .link(file_name_label(path))
                                .on_hover_text(path.display().to_string())
                                .clicked()
                            {
                                project_requests
                                    .0
                                    .write(LoadProjectRequest { path: path.clone() });
                            }
                        }
                    }
                });
            });
        });

    Ok(())
}

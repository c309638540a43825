//! Save and export request systems.

use bevy::prelude::*;

use crate::config::PathKind;
use crate::editor::EditorState;

use super::files::{with_project_extension, write_flight_plan, write_marker_map, write_project};
use super::messages::{ExportMapRequest, SavePlanRequest, SaveProjectRequest};
use super::resources::AsyncFileOperation;
use super::results::{FileOpResult, FileOutcome};
use super::tasks::spawn_file_task;

/// Starts an async marker map export
pub fn export_map_system(
    mut commands: Commands,
    mut events: MessageReader<ExportMapRequest>,
    mut async_op: ResMut<AsyncFileOperation>,
) {
    for event in events.read() {
        // Don't start a new save if one is already in progress
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }

        let path = event.path.clone();
        let markers = event.markers.clone();
        spawn_file_task(&mut commands, &mut async_op, true, &event.path, move || {
            FileOpResult {
                outcome: FileOutcome::Saved(write_marker_map(&path, &markers)),
                kind: PathKind::Map,
                path,
            }
        });
    }
}

/// Starts an async flight plan save
pub fn save_plan_system(
    mut commands: Commands,
    mut events: MessageReader<SavePlanRequest>,
    mut async_op: ResMut<AsyncFileOperation>,
    state: Res<EditorState>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }

        let path = event.path.clone();
        let plan = state.plan.clone();
        spawn_file_task(&mut commands, &mut async_op, true, &event.path, move || {
            FileOpResult {
                outcome: FileOutcome::Saved(write_flight_plan(&path, &plan)),
                kind: PathKind::Plan,
                path,
            }
        });
    }
}

/// Starts an async project save
pub fn save_project_system(
    mut commands: Commands,
    mut events: MessageReader<SaveProjectRequest>,
    mut async_op: ResMut<AsyncFileOperation>,
    state: Res<EditorState>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }

        let path = with_project_extension(event.path.clone());
        let target = path.clone();
        let project = state.snapshot();
        spawn_file_task(&mut commands, &mut async_op, true, &target, move || {
            FileOpResult {
                outcome: FileOutcome::Saved(write_project(&path, &project)),
                kind: PathKind::Project,
                path,
            }
        });
    }
}

//! Load request systems.

use bevy::prelude::*;

use crate::config::PathKind;
use crate::editor::EditorState;

use super::files::{read_flight_plan, read_marker_map, read_project};
use super::messages::{LoadMapRequest, LoadPlanRequest, LoadProjectRequest};
use super::resources::AsyncFileOperation;
use super::results::{FileOpResult, FileOutcome};
use super::tasks::spawn_file_task;

/// Starts an async marker map load
pub fn load_map_system(
    mut commands: Commands,
    mut events: MessageReader<LoadMapRequest>,
    mut async_op: ResMut<AsyncFileOperation>,
) {
    for event in events.read() {
        // Don't start a new load if one is already in progress
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }

        let path = event.path.clone();
        spawn_file_task(&mut commands, &mut async_op, false, &event.path, move || {
            FileOpResult {
                outcome: FileOutcome::MapLoaded(read_marker_map(&path)),
                kind: PathKind::Map,
                path,
            }
        });
    }
}

/// Starts an async flight plan load, resolved against the markers loaded now
pub fn load_plan_system(
    mut commands: Commands,
    mut events: MessageReader<LoadPlanRequest>,
    mut async_op: ResMut<AsyncFileOperation>,
    state: Res<EditorState>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }

        let path = event.path.clone();
        let known_positions = state.markers.positions();
        spawn_file_task(&mut commands, &mut async_op, false, &event.path, move || {
            FileOpResult {
                outcome: FileOutcome::PlanLoaded(read_flight_plan(&path, &known_positions)),
                kind: PathKind::Plan,
                path,
            }
        });
    }
}

/// Starts an async project load
pub fn load_project_system(
    mut commands: Commands,
    mut events: MessageReader<LoadProjectRequest>,
    mut async_op: ResMut<AsyncFileOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("File operation already in progress");
            continue;
        }

        let path = event.path.clone();
        spawn_file_task(&mut commands, &mut async_op, false, &event.path, move || {
            FileOpResult {
                outcome: FileOutcome::ProjectLoaded(read_project(&path)),
                kind: PathKind::Project,
                path,
            }
        });
    }
}

//! Spawning file tasks and applying their results on the main schedule.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;
use std::path::Path;

use crate::config::{PathKind, RememberPathRequest};
use crate::editor::EditorState;
use crate::error::Result;

use super::resources::{AsyncFileOperation, CurrentProjectFile, FileTask, Notice, UserNotice};
use super::results::{FileOpResult, FileOutcome};

pub(super) fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
        .to_string()
}

/// Mark the operation busy and run `job` on the I/O pool.
pub(super) fn spawn_file_task<F>(
    commands: &mut Commands,
    async_op: &mut AsyncFileOperation,
    saving: bool,
    path: &Path,
    job: F,
) where
    F: FnOnce() -> FileOpResult + Send + 'static,
{
    let verb = if saving { "Saving" } else { "Loading" };
    async_op.begin(saving, format!("{} {}...", verb, file_label(path)));

    let task = IoTaskPool::get().spawn(async move { job() });
    commands.spawn(FileTask(task));
}

fn kind_name(kind: PathKind) -> &'static str {
    match kind {
        PathKind::Map => "Map",
        PathKind::Plan => "Flight plan",
        PathKind::Project => "Project",
    }
}

/// Apply a finished operation to the editor. Failed loads roll back the
/// affected collections; `Ok` carries the message for the operator.
pub fn apply_outcome(state: &mut EditorState, path: &Path, outcome: FileOutcome) -> Result<String> {
    match outcome {
        FileOutcome::MapLoaded(result) => state
            .apply_map_load(result)
            .map(|count| format!("Loaded {} markers", count)),
        FileOutcome::PlanLoaded(result) => state
            .apply_plan_load(result)
            .map(|count| format!("Loaded {} waypoints", count)),
        FileOutcome::ProjectLoaded(result) => state
            .apply_project_load(result)
            .map(|()| "Project loaded".to_string()),
        FileOutcome::Saved(result) => result.map(|()| format!("Saved to {}", path.display())),
    }
}

/// Turn a finished operation into the notice shown to the operator.
pub fn notice_for(kind: PathKind, saving: bool, result: &Result<String>) -> Notice {
    let action = if saving { "save" } else { "load" };
    match result {
        Ok(message) => Notice::info(kind_name(kind), message.clone()),
        Err(e) => Notice::error(
            format!("{} {} failed", kind_name(kind), action),
            e.to_string(),
        ),
    }
}

/// Polls file tasks and applies results to the editor state
pub fn poll_file_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut FileTask)>,
    mut async_op: ResMut<AsyncFileOperation>,
    mut state: ResMut<EditorState>,
    mut notice: ResMut<UserNotice>,
    mut current_project: ResMut<CurrentProjectFile>,
    mut config_events: MessageWriter<RememberPathRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.finish();

            let FileOpResult {
                path,
                kind,
                outcome,
            } = result;
            let saving = matches!(outcome, FileOutcome::Saved(_));
            let applied = apply_outcome(&mut state, &path, outcome);

            match &applied {
                Ok(message) => {
                    info!("{} ({:?})", message, path);
                    if kind == PathKind::Project {
                        current_project.path = Some(path.clone());
                    }
                    config_events.write(RememberPathRequest {
                        kind,
                        path: path.clone(),
                    });
                }
                Err(e) => error!("{:?} operation on {:?} failed: {}", kind, path, e),
            }
            notice.current = Some(notice_for(kind, saving, &applied));

            commands.entity(entity).despawn();
        }
    }
}

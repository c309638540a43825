mod flight_plan;
mod marker;
mod obstacle;
pub mod persistence;
mod project;

pub use flight_plan::FlightPlan;
pub use marker::{Marker, MarkerMap};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleStore, Shape};
pub use persistence::{
    AsyncFileOperation, CurrentProjectFile, ExportMapRequest, LoadMapRequest, LoadPlanRequest,
    LoadProjectRequest, Notice, NoticeLevel, SavePlanRequest, SaveProjectRequest, UserNotice,
};
pub use project::ProjectSnapshot;

use bevy::prelude::*;

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AsyncFileOperation>()
            .init_resource::<UserNotice>()
            .init_resource::<CurrentProjectFile>()
            .add_message::<LoadMapRequest>()
            .add_message::<ExportMapRequest>()
            .add_message::<LoadPlanRequest>()
            .add_message::<SavePlanRequest>()
            .add_message::<LoadProjectRequest>()
            .add_message::<SaveProjectRequest>()
            .add_systems(Startup, persistence::ensure_projects_directory)
            .add_systems(
                Update,
                (
                    persistence::load_map_system.run_if(on_message::<LoadMapRequest>),
                    persistence::export_map_system.run_if(on_message::<ExportMapRequest>),
                    persistence::load_plan_system.run_if(on_message::<LoadPlanRequest>),
                    persistence::save_plan_system.run_if(on_message::<SavePlanRequest>),
                    persistence::load_project_system.run_if(on_message::<LoadProjectRequest>),
                    persistence::save_project_system.run_if(on_message::<SaveProjectRequest>),
                    persistence::poll_file_tasks,
                ),
            );
    }
}

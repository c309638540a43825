mod camera;
mod conditions;
mod grid;
mod input;
pub mod params;
mod render;
pub mod scene;
pub mod session;
mod state;
pub mod tools;

pub use camera::EditorCamera;
pub use grid::GridSettings;
pub use state::EditorState;

use bevy::prelude::*;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorState>()
            .init_resource::<GridSettings>()
            .add_systems(Startup, camera::spawn_camera)
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    grid::draw_grid,
                ),
            )
            .add_systems(
                Update,
                (
                    input::release_pointer,
                    (
                        tools::handle_tool_shortcuts,
                        input::handle_edit_keys,
                        input::handle_pointer,
                    )
                        .chain()
                        .run_if(conditions::no_dialog_open),
                    tools::update_cursor_icon,
                    render::draw_scene,
                )
                    .chain(),
            );
    }
}

use bevy::prelude::*;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, GRID_SPACING};
use crate::theme;

use super::camera::CameraZoom;
use super::EditorCamera;

#[derive(Resource)]
pub struct GridSettings {
    pub visible: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Grid line indices covering a view of `size` centered on `center`.
pub fn visible_grid_range(center: Vec2, size: Vec2, spacing: f32) -> (IVec2, IVec2) {
    let min = ((center - size / 2.0) / spacing).floor().as_ivec2();
    let max = ((center + size / 2.0) / spacing).ceil().as_ivec2();
    (min, max)
}

pub fn draw_grid(
    mut gizmos: Gizmos,
    settings: Res<GridSettings>,
    camera_query: Query<(&Transform, &CameraZoom), With<EditorCamera>>,
) {
    if !settings.visible {
        return;
    }

    let Ok((camera_transform, zoom)) = camera_query.single() else {
        return;
    };

    let view = Vec2::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT) * zoom.scale;
    let (min, max) = visible_grid_range(camera_transform.translation.truncate(), view, GRID_SPACING);

    for x in min.x..=max.x {
        let x_pos = x as f32 * GRID_SPACING;
        let color = if x == 0 { theme::AXIS_COLOR } else { theme::GRID_COLOR };
        gizmos.line_2d(
            Vec2::new(x_pos, min.y as f32 * GRID_SPACING),
            Vec2::new(x_pos, max.y as f32 * GRID_SPACING),
            color,
        );
    }

    for y in min.y..=max.y {
        let y_pos = y as f32 * GRID_SPACING;
        let color = if y == 0 { theme::AXIS_COLOR } else { theme::GRID_COLOR };
        gizmos.line_2d(
            Vec2::new(min.x as f32 * GRID_SPACING, y_pos),
            Vec2::new(max.x as f32 * GRID_SPACING, y_pos),
            color,
        );
    }
}

//! Draws the scene with gizmos.

use bevy::prelude::*;

use crate::map::{ObstacleKind, Shape};
use crate::theme;

use super::scene::{Drawable, DrawableKind, Primitive};
use super::state::EditorState;

/// Radius of the dot drawn at each waypoint
const WAYPOINT_DOT_RADIUS: f32 = 0.04;

fn drawable_color(drawable: &Drawable, obstacle_kind: Option<ObstacleKind>) -> Color {
    match drawable.kind {
        DrawableKind::Marker { .. } if drawable.highlighted => theme::MARKER_HIGHLIGHT,
        DrawableKind::Marker { .. } => theme::MARKER_COLOR,
        DrawableKind::Obstacle { .. } if drawable.highlighted => theme::SELECTION_COLOR,
        DrawableKind::Obstacle { .. } => obstacle_kind
            .map(theme::obstacle_color)
            .unwrap_or(theme::SELECTION_COLOR),
        DrawableKind::Handle { .. } => theme::HANDLE_COLOR,
        DrawableKind::Path => theme::PATH_COLOR,
    }
}

fn draw_shape(gizmos: &mut Gizmos, shape: Shape, color: Color) {
    match shape {
        Shape::Rect { center, size } => {
            gizmos.rect_2d(Isometry2d::from_translation(center), size, color);
        }
        Shape::Circle { center, radius } => {
            gizmos.circle_2d(Isometry2d::from_translation(center), radius, color);
        }
    }
}

pub fn draw_scene(mut gizmos: Gizmos, state: Res<EditorState>) {
    let scene = state.scene();

    for drawable in &scene.drawables {
        let obstacle_kind = match drawable.kind {
            DrawableKind::Obstacle { index } => state.obstacles.get(index).map(|o| o.kind()),
            _ => None,
        };
        let color = drawable_color(drawable, obstacle_kind);

        match &drawable.primitive {
            Primitive::Shape(shape) => draw_shape(&mut gizmos, *shape, color),
            Primitive::Polyline(points) => {
                if points.len() > 1 {
                    gizmos.linestrip_2d(points.iter().copied(), color);
                }
                for point in points {
                    gizmos.circle_2d(
                        Isometry2d::from_translation(*point),
                        WAYPOINT_DOT_RADIUS,
                        color,
                    );
                }
            }
        }
    }
}

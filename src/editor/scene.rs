//! Flattened, renderer-agnostic view of the editor state.
//!
//! Every drawable carries what it depicts, so the renderer and tests can ask
//! "which obstacle is this" without probing shape attributes.

use bevy::math::Vec2;

use crate::constants::HANDLE_RADIUS;
use crate::map::Shape;

use super::state::EditorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawableKind {
    Marker { index: usize },
    Obstacle { index: usize },
    Handle { obstacle: usize, handle: usize },
    Path,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Shape(Shape),
    /// Waypoints in flight order; a single point is drawn as a dot
    Polyline(Vec<Vec2>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub kind: DrawableKind,
    pub primitive: Primitive,
    pub highlighted: bool,
}

/// Draw order is the order of `drawables`: markers, obstacles, handles, path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub drawables: Vec<Drawable>,
    pub selected_obstacle: Option<usize>,
    pub selected_marker: Option<usize>,
}

impl Scene {
    pub fn of_kind(
        &self,
        predicate: impl Fn(&DrawableKind) -> bool,
    ) -> impl Iterator<Item = &Drawable> {
        self.drawables.iter().filter(move |d| predicate(&d.kind))
    }

    pub fn markers(&self) -> impl Iterator<Item = &Drawable> {
        self.of_kind(|k| matches!(k, DrawableKind::Marker { .. }))
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Drawable> {
        self.of_kind(|k| matches!(k, DrawableKind::Obstacle { .. }))
    }

    pub fn handles(&self) -> impl Iterator<Item = &Drawable> {
        self.of_kind(|k| matches!(k, DrawableKind::Handle { .. }))
    }

    pub fn path(&self) -> Option<&[Vec2]> {
        self.drawables.iter().find_map(|d| match (&d.kind, &d.primitive) {
            (DrawableKind::Path, Primitive::Polyline(points)) => Some(points.as_slice()),
            _ => None,
        })
    }
}

pub fn build_scene(state: &EditorState) -> Scene {
    let selected_obstacle = state.session.selected_obstacle();
    let selected_marker = state.session.selected_marker();
    let mut drawables = Vec::new();

    for (index, marker) in state.markers.markers().iter().enumerate() {
        drawables.push(Drawable {
            kind: DrawableKind::Marker { index },
            primitive: Primitive::Shape(Shape::Rect {
                center: marker.position(),
                size: Vec2::splat(marker.length),
            }),
            highlighted: selected_marker == Some(index),
        });
    }

    let mut handles = Vec::new();
    for (index, obstacle) in state.obstacles.as_slice().iter().enumerate() {
        let selected = selected_obstacle == Some(index);
        let bounds = obstacle.bounds(selected);
        drawables.push(Drawable {
            kind: DrawableKind::Obstacle { index },
            primitive: Primitive::Shape(bounds.shape),
            highlighted: selected,
        });
        handles.extend(bounds.handles.into_iter().enumerate().map(|(handle, center)| {
            Drawable {
                kind: DrawableKind::Handle {
                    obstacle: index,
                    handle,
                },
                primitive: Primitive::Shape(Shape::Circle {
                    center,
                    radius: HANDLE_RADIUS,
                }),
                highlighted: true,
            }
        }));
    }
    drawables.extend(handles);

    if !state.plan.is_empty() {
        drawables.push(Drawable {
            kind: DrawableKind::Path,
            primitive: Primitive::Polyline(state.plan.polyline()),
            highlighted: false,
        });
    }

    Scene {
        drawables,
        selected_obstacle,
        selected_marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MarkerMap, ObstacleKind};

    fn state() -> EditorState {
        let mut state = EditorState::default();
        state
            .apply_map_load(MarkerMap::from_text(
                "0 0.18 0.0 0.0 0.0 0.0 0.0 0.0\n1 0.18 1.0 0.0 0.0 0.0 0.0 0.0",
            ))
            .unwrap();
        state.obstacles.place(ObstacleKind::Box, Vec2::new(2.0, 2.0));
        state.obstacles.place(ObstacleKind::Flag, Vec2::new(-2.0, 0.0));
        state
    }

    #[test]
    fn test_empty_state_has_empty_scene() {
        assert_eq!(EditorState::default().scene(), Scene::default());
    }

    #[test]
    fn test_markers_and_obstacles_without_selection() {
        let scene = state().scene();
        assert_eq!(scene.markers().count(), 2);
        assert_eq!(scene.obstacles().count(), 2);
        assert_eq!(scene.handles().count(), 0);
        assert!(scene.path().is_none());
        assert!(scene.drawables.iter().all(|d| !d.highlighted));
    }

    #[test]
    fn test_marker_footprint_is_square_of_length() {
        let scene = state().scene();
        let first = scene.markers().next().map(|d| d.primitive.clone());
        assert_eq!(
            first,
            Some(Primitive::Shape(Shape::Rect {
                center: Vec2::ZERO,
                size: Vec2::splat(0.18)
            }))
        );
    }

    #[test]
    fn test_selected_obstacle_gets_handles() {
        let mut state = state();
        state.pointer_down(Vec2::new(2.0, 2.0));
        state.pointer_up();

        let scene = state.scene();
        assert_eq!(scene.selected_obstacle, Some(0));
        let kinds: Vec<DrawableKind> = scene.handles().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DrawableKind::Handle {
                    obstacle: 0,
                    handle: 0
                },
                DrawableKind::Handle {
                    obstacle: 0,
                    handle: 1
                },
            ]
        );
        let highlighted: Vec<DrawableKind> = scene
            .obstacles()
            .filter(|d| d.highlighted)
            .map(|d| d.kind)
            .collect();
        assert_eq!(highlighted, vec![DrawableKind::Obstacle { index: 0 }]);
    }

    #[test]
    fn test_selected_marker_highlight_and_path() {
        let mut state = state();
        state.pointer_down(Vec2::new(1.0, 0.0));
        state.add_waypoint(1.0).unwrap();
        state.pointer_down(Vec2::ZERO);
        state.add_waypoint(2.0).unwrap();

        let scene = state.scene();
        assert_eq!(scene.selected_marker, Some(0));
        let highlighted: Vec<DrawableKind> = scene
            .markers()
            .filter(|d| d.highlighted)
            .map(|d| d.kind)
            .collect();
        assert_eq!(highlighted, vec![DrawableKind::Marker { index: 0 }]);
        assert_eq!(
            scene.path(),
            Some([Vec2::new(1.0, 0.0), Vec2::ZERO].as_slice())
        );
    }

    #[test]
    fn test_path_is_drawn_last() {
        let mut state = state();
        state.pointer_down(Vec2::ZERO);
        state.add_waypoint(1.0).unwrap();
        let scene = state.scene();
        assert_eq!(scene.drawables.last().map(|d| d.kind), Some(DrawableKind::Path));
    }
}

//! Obstacle primitives placed on the map and their geometry.
//!
//! Obstacles are a closed set of kinds. Every geometric question (outline,
//! handle positions, picking, resizing) is answered by an exhaustive match so
//! a new kind cannot be added without handling it everywhere.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    ARCH_DEFAULT_LENGTH, ARCH_DEFAULT_THICKNESS, ARCH_MIN_LENGTH, ARCH_MIN_THICKNESS,
    BOX_DEFAULT_SIZE, BOX_MIN_SIZE, FLAG_DEFAULT_RADIUS, FLAG_MIN_RADIUS,
};
use crate::error::{PlannerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Box,
    Arch,
    Flag,
}

impl ObstacleKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ObstacleKind::Box => "Box (1)",
            ObstacleKind::Arch => "Arch (2)",
            ObstacleKind::Flag => "Flag (3)",
        }
    }

    pub fn all() -> &'static [ObstacleKind] {
        &[ObstacleKind::Box, ObstacleKind::Arch, ObstacleKind::Flag]
    }

    /// A new obstacle of this kind with default dimensions.
    pub fn spawn_at(&self, position: Vec2) -> Obstacle {
        match self {
            ObstacleKind::Box => Obstacle::Box {
                position,
                size: BOX_DEFAULT_SIZE,
            },
            ObstacleKind::Arch => Obstacle::Arch {
                position,
                length: ARCH_DEFAULT_LENGTH,
                thickness: ARCH_DEFAULT_THICKNESS,
            },
            ObstacleKind::Flag => Obstacle::Flag {
                position,
                radius: FLAG_DEFAULT_RADIUS,
            },
        }
    }
}

/// Renderable outline of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { center: Vec2, size: Vec2 },
    Circle { center: Vec2, radius: f32 },
}

impl Shape {
    /// Whether `point` lies inside the shape grown by `tolerance`.
    pub fn contains(&self, point: Vec2, tolerance: f32) -> bool {
        match *self {
            Shape::Rect { center, size } => {
                let half = size / 2.0 + Vec2::splat(tolerance);
                let d = (point - center).abs();
                d.x <= half.x && d.y <= half.y
            }
            Shape::Circle { center, radius } => point.distance(center) <= radius + tolerance,
        }
    }
}

/// Outline plus the resize handles to show for it (empty when not selected).
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleBounds {
    pub shape: Shape,
    pub handles: Vec<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Obstacle {
    /// Square of side `size` centered on `position`.
    Box { position: Vec2, size: f32 },
    /// Horizontal bar `length` wide and `thickness` tall, centered on `position`.
    Arch {
        position: Vec2,
        length: f32,
        thickness: f32,
    },
    /// Disc of `radius` centered on `position`.
    Flag { position: Vec2, radius: f32 },
}

impl Obstacle {
    pub fn kind(&self) -> ObstacleKind {
        match self {
            Obstacle::Box { .. } => ObstacleKind::Box,
            Obstacle::Arch { .. } => ObstacleKind::Arch,
            Obstacle::Flag { .. } => ObstacleKind::Flag,
        }
    }

    pub fn position(&self) -> Vec2 {
        match self {
            Obstacle::Box { position, .. }
            | Obstacle::Arch { position, .. }
            | Obstacle::Flag { position, .. } => *position,
        }
    }

    pub fn set_position(&mut self, new_position: Vec2) {
        match self {
            Obstacle::Box { position, .. }
            | Obstacle::Arch { position, .. }
            | Obstacle::Flag { position, .. } => *position = new_position,
        }
    }

    pub fn shape(&self) -> Shape {
        match *self {
            Obstacle::Box { position, size } => Shape::Rect {
                center: position,
                size: Vec2::splat(size),
            },
            Obstacle::Arch {
                position,
                length,
                thickness,
            } => Shape::Rect {
                center: position,
                size: Vec2::new(length, thickness),
            },
            Obstacle::Flag { position, radius } => Shape::Circle {
                center: position,
                radius,
            },
        }
    }

    /// Resize handle positions, indexed the same way as [`Obstacle::resized`].
    ///
    /// - Box: top-right corner, bottom-left corner
    /// - Arch: right edge middle (length), top edge middle (thickness)
    /// - Flag: rightmost point of the disc (radius)
    pub fn handles(&self) -> Vec<Vec2> {
        match *self {
            Obstacle::Box { position, size } => {
                let half = size / 2.0;
                vec![position + Vec2::splat(half), position - Vec2::splat(half)]
            }
            Obstacle::Arch {
                position,
                length,
                thickness,
            } => vec![
                position + Vec2::new(length / 2.0, 0.0),
                position + Vec2::new(0.0, thickness / 2.0),
            ],
            Obstacle::Flag { position, radius } => vec![position + Vec2::new(radius, 0.0)],
        }
    }

    pub fn bounds(&self, selected: bool) -> ObstacleBounds {
        ObstacleBounds {
            shape: self.shape(),
            handles: if selected { self.handles() } else { Vec::new() },
        }
    }

    pub fn contains(&self, point: Vec2, tolerance: f32) -> bool {
        self.shape().contains(point, tolerance)
    }

    /// Index of the first handle within `radius` of `point`.
    pub fn handle_at(&self, point: Vec2, radius: f32) -> Option<usize> {
        self.handles()
            .iter()
            .position(|handle| handle.distance(point) <= radius)
    }

    /// Apply a handle drag to `anchor` (the obstacle as it was when the drag
    /// began) and return the resized obstacle. Floors are always enforced.
    pub fn resized(anchor: &Obstacle, handle: usize, pointer: Vec2) -> Result<Obstacle> {
        if !pointer.is_finite() {
            return Err(PlannerError::validation(format!(
                "pointer position is not finite: {:?}",
                pointer
            )));
        }
        let (x, y) = (pointer.x, pointer.y);

        let resized = match (*anchor, handle) {
            (Obstacle::Box { position, size }, 0) => Obstacle::Box {
                position,
                size: BOX_MIN_SIZE.max(x - (position.x - size / 2.0)),
            },
            (Obstacle::Box { position, size }, 1) => {
                let size = BOX_MIN_SIZE.max((position.x + size / 2.0) - x);
                Obstacle::Box {
                    position: Vec2::new(x + size / 2.0, y + size / 2.0),
                    size,
                }
            }
            (
                Obstacle::Arch {
                    position,
                    length,
                    thickness,
                },
                0,
            ) => Obstacle::Arch {
                position,
                length: ARCH_MIN_LENGTH.max(x - (position.x - length / 2.0)),
                thickness,
            },
            (
                Obstacle::Arch {
                    position,
                    length,
                    thickness,
                },
                1,
            ) => Obstacle::Arch {
                position,
                length,
                thickness: ARCH_MIN_THICKNESS.max(y - (position.y - thickness / 2.0)),
            },
            (Obstacle::Flag { position, .. }, 0) => Obstacle::Flag {
                position,
                radius: FLAG_MIN_RADIUS.max(pointer.distance(position)),
            },
            (other, _) => {
                return Err(PlannerError::validation(format!(
                    "{:?} has no handle {}",
                    other.kind(),
                    handle
                )));
            }
        };

        Ok(resized)
    }
}

/// Ordered obstacles; the index is the obstacle's identity and its draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleStore {
    obstacles: Vec<Obstacle>,
}

impl ObstacleStore {
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Append a default-sized obstacle of `kind` and return its index.
    pub fn place(&mut self, kind: ObstacleKind, position: Vec2) -> usize {
        self.obstacles.push(kind.spawn_at(position));
        self.obstacles.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(index)
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Topmost obstacle containing `point`; later obstacles occlude earlier ones.
    pub fn hit_test(&self, point: Vec2, tolerance: f32) -> Option<usize> {
        self.obstacles
            .iter()
            .rposition(|o| o.contains(point, tolerance))
    }

    /// Remove an obstacle; every later index shifts down by one.
    pub fn delete(&mut self, index: usize) -> Option<Obstacle> {
        (index < self.obstacles.len()).then(|| self.obstacles.remove(index))
    }
}

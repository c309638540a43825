//! Pointer and keyboard state machine for editing obstacles.
//!
//! The session never draws anything. It receives pointer positions in map
//! coordinates plus abstract keys and mutates the [`ObstacleStore`] it is
//! handed. Phases:
//!
//! - `Idle`: nothing selected
//! - `Placing`: placement mode is on, clicks create obstacles
//! - `Selected`: one obstacle is selected, pointer is up
//! - `Dragging`: pointer is down on the selected obstacle, it follows the pointer
//! - `Resizing`: pointer is down on a handle of the selected obstacle
//!
//! Marker picking runs alongside obstacle selection and only records which
//! marker the next waypoint operation refers to.

use bevy::log::{debug, warn};
use bevy::math::Vec2;

use crate::common::DragMode;
use crate::constants::{HANDLE_RADIUS, MARKER_PICK_TOLERANCE, OBSTACLE_PICK_TOLERANCE};
use crate::error::{PlannerError, Result};
use crate::map::{MarkerMap, Obstacle, ObstacleKind, ObstacleStore};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditPhase {
    #[default]
    Idle,
    Placing,
    Selected {
        index: usize,
    },
    Dragging {
        index: usize,
    },
    Resizing {
        index: usize,
        handle: usize,
        /// The obstacle as it was when the handle was grabbed
        anchor: Obstacle,
    },
}

/// Keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Delete or Backspace
    Delete,
    Escape,
}

/// What a pointer-down did, for callers that want to react (logging, UI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDownOutcome {
    Placed { index: usize },
    ResizeStarted { index: usize, handle: usize },
    DragStarted { index: usize },
    /// Background click; `marker` is the marker picked near the pointer, if any
    Background { marker: Option<usize> },
}

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    phase: EditPhase,
    placement_mode: bool,
    kind: ObstacleKind,
    selected_marker: Option<usize>,
}

impl EditSession {
    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn placement_mode(&self) -> bool {
        self.placement_mode
    }

    pub fn obstacle_kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn set_obstacle_kind(&mut self, kind: ObstacleKind) {
        self.kind = kind;
    }

    /// Index of the selected obstacle in any of the selection phases.
    pub fn selected_obstacle(&self) -> Option<usize> {
        match self.phase {
            EditPhase::Selected { index }
            | EditPhase::Dragging { index }
            | EditPhase::Resizing { index, .. } => Some(index),
            EditPhase::Idle | EditPhase::Placing => None,
        }
    }

    pub fn selected_marker(&self) -> Option<usize> {
        self.selected_marker
    }

    pub fn select_marker(&mut self, index: usize) {
        self.selected_marker = Some(index);
    }

    pub fn clear_selected_marker(&mut self) {
        self.selected_marker = None;
    }

    pub fn drag_mode(&self) -> DragMode {
        match self.phase {
            EditPhase::Dragging { .. } => DragMode::Move,
            EditPhase::Resizing { .. } => DragMode::Resize,
            _ => DragMode::None,
        }
    }

    fn rest_phase(&self) -> EditPhase {
        if self.placement_mode {
            EditPhase::Placing
        } else {
            EditPhase::Idle
        }
    }

    /// Flip placement mode. Either way the obstacle selection is dropped.
    pub fn toggle_placement_mode(&mut self) {
        self.placement_mode = !self.placement_mode;
        self.phase = self.rest_phase();
        debug!("Placement mode {}", if self.placement_mode { "on" } else { "off" });
    }

    pub fn pointer_down(
        &mut self,
        point: Vec2,
        obstacles: &mut ObstacleStore,
        markers: &MarkerMap,
    ) -> PointerDownOutcome {
        if self.placement_mode {
            let index = obstacles.place(self.kind, point);
            self.phase = EditPhase::Placing;
            debug!("Placed {:?} #{} at {:?}", self.kind, index, point);
            return PointerDownOutcome::Placed { index };
        }

        // Handles of the current selection take priority over bodies
        if let Some(index) = self.selected_obstacle()
            && let Some(obstacle) = obstacles.get(index)
            && let Some(handle) = obstacle.handle_at(point, HANDLE_RADIUS)
        {
            self.phase = EditPhase::Resizing {
                index,
                handle,
                anchor: *obstacle,
            };
            return PointerDownOutcome::ResizeStarted { index, handle };
        }

        if let Some(index) = obstacles.hit_test(point, OBSTACLE_PICK_TOLERANCE) {
            self.phase = EditPhase::Dragging { index };
            return PointerDownOutcome::DragStarted { index };
        }

        self.phase = EditPhase::Idle;
        let marker = markers.nearest_within(point, MARKER_PICK_TOLERANCE);
        if marker.is_some() {
            self.selected_marker = marker;
        }
        PointerDownOutcome::Background { marker }
    }

    /// Move or resize the selected obstacle. A failure ends the drag and
    /// leaves the obstacle selected; it is logged, never returned.
    pub fn pointer_move(&mut self, point: Vec2, obstacles: &mut ObstacleStore) {
        let result = match self.phase {
            EditPhase::Dragging { index } => drag_to(obstacles, index, point),
            EditPhase::Resizing {
                index,
                handle,
                anchor,
            } => resize_to(obstacles, index, handle, &anchor, point),
            _ => return,
        };

        if let Err(e) = result {
            warn!("Aborting obstacle drag: {}", e);
            self.phase = match self.selected_obstacle() {
                Some(index) if index < obstacles.len() => EditPhase::Selected { index },
                _ => EditPhase::Idle,
            };
        }
    }

    pub fn pointer_up(&mut self) {
        if let EditPhase::Dragging { index } | EditPhase::Resizing { index, .. } = self.phase {
            self.phase = EditPhase::Selected { index };
        }
    }

    pub fn key_press(&mut self, key: EditKey, obstacles: &mut ObstacleStore) {
        match key {
            EditKey::Delete => {
                if let Some(index) = self.selected_obstacle() {
                    if obstacles.delete(index).is_some() {
                        debug!("Deleted obstacle #{}", index);
                    }
                    self.phase = self.rest_phase();
                }
            }
            EditKey::Escape => self.phase = self.rest_phase(),
        }
    }

    /// Forget everything that refers to loaded content.
    pub fn reset_selection(&mut self) {
        self.phase = self.rest_phase();
        self.selected_marker = None;
    }
}

fn drag_to(obstacles: &mut ObstacleStore, index: usize, point: Vec2) -> Result<()> {
    if !point.is_finite() {
        return Err(PlannerError::validation(format!(
            "pointer position is not finite: {:?}",
            point
        )));
    }
    let obstacle = obstacles
        .get_mut(index)
        .ok_or_else(|| PlannerError::validation(format!("no obstacle at index {}", index)))?;
    obstacle.set_position(point);
    Ok(())
}

fn resize_to(
    obstacles: &mut ObstacleStore,
    index: usize,
    handle: usize,
    anchor: &Obstacle,
    point: Vec2,
) -> Result<()> {
    let resized = Obstacle::resized(anchor, handle, point)?;
    let obstacle = obstacles
        .get_mut(index)
        .ok_or_else(|| PlannerError::validation(format!("no obstacle at index {}", index)))?;
    *obstacle = resized;
    Ok(())
}

#[cfg(test)]
mod tests;

//! The single owner of everything the operator edits.
//!
//! Bevy systems never touch markers, obstacles or the flight plan directly;
//! they call the entry points here, which keeps every rule testable without
//! an app.

use bevy::log::info;
use bevy::math::{Vec2, Vec3};
use bevy::prelude::Resource;

use crate::error::{PlannerError, Result};
use crate::map::{FlightPlan, MarkerMap, ObstacleKind, ObstacleStore, ProjectSnapshot};

use super::scene::{Scene, build_scene};
use super::session::{EditKey, EditSession, PointerDownOutcome};

#[derive(Resource, Debug, Clone, Default)]
pub struct EditorState {
    pub markers: MarkerMap,
    pub obstacles: ObstacleStore,
    pub plan: FlightPlan,
    pub session: EditSession,
}

impl EditorState {
    pub fn pointer_down(&mut self, point: Vec2) -> PointerDownOutcome {
        self.session
            .pointer_down(point, &mut self.obstacles, &self.markers)
    }

    pub fn pointer_move(&mut self, point: Vec2) {
        self.session.pointer_move(point, &mut self.obstacles);
    }

    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    pub fn key_press(&mut self, key: EditKey) {
        self.session.key_press(key, &mut self.obstacles);
    }

    pub fn toggle_placement_mode(&mut self) {
        self.session.toggle_placement_mode();
    }

    pub fn set_obstacle_kind(&mut self, kind: ObstacleKind) {
        self.session.set_obstacle_kind(kind);
    }

    /// Position of the marker picked for waypoint operations.
    pub fn selected_marker_position(&self) -> Option<Vec2> {
        self.session
            .selected_marker()
            .and_then(|index| self.markers.get(index))
            .map(|marker| marker.position())
    }

    fn require_selected_marker(&self) -> Result<Vec2> {
        self.selected_marker_position()
            .ok_or_else(|| PlannerError::validation("select a marker first"))
    }

    pub fn add_waypoint(&mut self, height: f32) -> Result<usize> {
        let position = self.require_selected_marker()?;
        self.plan.append(position, height)
    }

    pub fn insert_waypoint(&mut self, index: usize, height: f32, before: bool) -> Result<usize> {
        let position = self.require_selected_marker()?;
        self.plan.insert(index, position, height, before)
    }

    pub fn remove_waypoint(&mut self, index: usize) -> Option<Vec3> {
        self.plan.remove(index)
    }

    pub fn clear_waypoints(&mut self) {
        self.plan.clear();
    }

    /// Swap in an edited marker map. The marker selection follows its
    /// position and is dropped when no marker sits there any more.
    pub fn replace_markers(&mut self, markers: MarkerMap) {
        let previous = self.selected_marker_position();
        self.markers = markers;
        self.session.clear_selected_marker();
        if let Some(position) = previous
            && let Some(index) = self
                .markers
                .markers()
                .iter()
                .position(|m| m.position() == position)
        {
            self.session.select_marker(index);
        }
    }

    /// Apply a map load. On failure the markers are rolled back to empty.
    pub fn apply_map_load(&mut self, result: Result<MarkerMap>) -> Result<usize> {
        self.session.clear_selected_marker();
        match result {
            Ok(markers) => {
                self.markers = markers;
                info!("Loaded {} markers", self.markers.len());
                Ok(self.markers.len())
            }
            Err(e) => {
                self.markers.clear();
                Err(e)
            }
        }
    }

    /// Apply a plan load. On failure the plan is rolled back to empty.
    pub fn apply_plan_load(&mut self, result: Result<Vec<Vec3>>) -> Result<usize> {
        match result {
            Ok(waypoints) => {
                self.plan.replace(waypoints);
                info!("Loaded flight plan with {} waypoints", self.plan.len());
                Ok(self.plan.len())
            }
            Err(e) => {
                self.plan.clear();
                Err(e)
            }
        }
    }

    /// Apply a project load. On failure every collection is emptied.
    pub fn apply_project_load(&mut self, result: Result<ProjectSnapshot>) -> Result<()> {
        self.session.reset_selection();
        match result {
            Ok(snapshot) => {
                self.markers = snapshot.markers;
                self.obstacles = snapshot.obstacles;
                self.plan = snapshot.plan;
                info!(
                    "Loaded project: {} markers, {} obstacles, {} waypoints",
                    self.markers.len(),
                    self.obstacles.len(),
                    self.plan.len()
                );
                Ok(())
            }
            Err(e) => {
                self.markers.clear();
                self.obstacles.clear();
                self.plan.clear();
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            markers: self.markers.clone(),
            obstacles: self.obstacles.clone(),
            plan: self.plan.clone(),
        }
    }

    pub fn scene(&self) -> Scene {
        build_scene(self)
    }
}

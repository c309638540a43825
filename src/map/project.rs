//! Project documents: markers, obstacles and flight plan in one JSON file.

use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ARCH_DEFAULT_LENGTH, ARCH_DEFAULT_THICKNESS, BOX_DEFAULT_SIZE, FLAG_DEFAULT_RADIUS,
    PROJECT_TYPE, PROJECT_VERSION,
};
use crate::error::{PlannerError, Result};

use super::{FlightPlan, Marker, MarkerMap, Obstacle, ObstacleStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub version: String,
    #[serde(rename = "type")]
    pub project_type: String,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            version: PROJECT_VERSION.to_string(),
            project_type: PROJECT_TYPE.to_string(),
        }
    }
}

fn default_box_size() -> f32 {
    BOX_DEFAULT_SIZE
}

fn default_arch_length() -> f32 {
    ARCH_DEFAULT_LENGTH
}

fn default_arch_thickness() -> f32 {
    ARCH_DEFAULT_THICKNESS
}

fn default_flag_radius() -> f32 {
    FLAG_DEFAULT_RADIUS
}

/// Obstacle as stored on disk. The aliases accept files written by
/// the Russian-language version of the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SavedObstacle {
    #[serde(rename = "box", alias = "куб")]
    Box {
        position: [f32; 2],
        #[serde(default = "default_box_size")]
        size: f32,
    },
    #[serde(rename = "arch", alias = "арка")]
    Arch {
        position: [f32; 2],
        #[serde(default = "default_arch_length")]
        length: f32,
        #[serde(default = "default_arch_thickness")]
        thickness: f32,
    },
    #[serde(rename = "flag", alias = "флаг")]
    Flag {
        position: [f32; 2],
        #[serde(default = "default_flag_radius")]
        radius: f32,
    },
}

impl From<&Obstacle> for SavedObstacle {
    fn from(obstacle: &Obstacle) -> Self {
        match *obstacle {
            Obstacle::Box { position, size } => SavedObstacle::Box {
                position: position.to_array(),
                size,
            },
            Obstacle::Arch {
                position,
                length,
                thickness,
            } => SavedObstacle::Arch {
                position: position.to_array(),
                length,
                thickness,
            },
            Obstacle::Flag { position, radius } => SavedObstacle::Flag {
                position: position.to_array(),
                radius,
            },
        }
    }
}

impl TryFrom<SavedObstacle> for Obstacle {
    type Error = PlannerError;

    fn try_from(saved: SavedObstacle) -> Result<Self> {
        let obstacle = match saved {
            SavedObstacle::Box { position, size } => Obstacle::Box {
                position: Vec2::from_array(position),
                size,
            },
            SavedObstacle::Arch {
                position,
                length,
                thickness,
            } => Obstacle::Arch {
                position: Vec2::from_array(position),
                length,
                thickness,
            },
            SavedObstacle::Flag { position, radius } => Obstacle::Flag {
                position: Vec2::from_array(position),
                radius,
            },
        };

        let dimensions_ok = match obstacle {
            Obstacle::Box { size, .. } => size > 0.0,
            Obstacle::Arch {
                length, thickness, ..
            } => length > 0.0 && thickness > 0.0,
            Obstacle::Flag { radius, .. } => radius > 0.0,
        };
        if !dimensions_ok || !obstacle.position().is_finite() {
            return Err(PlannerError::validation(format!(
                "invalid {:?} obstacle dimensions",
                obstacle.kind()
            )));
        }
        Ok(obstacle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProject {
    pub metadata: ProjectMetadata,
    pub markers: Vec<Marker>,
    pub obstacles: Vec<SavedObstacle>,
    pub flight_plan: Vec<[f32; 3]>,
}

/// The three editable collections, captured or restored together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSnapshot {
    pub markers: MarkerMap,
    pub obstacles: ObstacleStore,
    pub plan: FlightPlan,
}

impl ProjectSnapshot {
    pub fn to_document(&self) -> SavedProject {
        SavedProject {
            metadata: ProjectMetadata::default(),
            markers: self.markers.markers().to_vec(),
            obstacles: self
                .obstacles
                .as_slice()
                .iter()
                .map(SavedObstacle::from)
                .collect(),
            flight_plan: self.plan.waypoints().iter().map(|w| w.to_array()).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn from_document(document: SavedProject) -> Result<Self> {
        if document.metadata.project_type != PROJECT_TYPE {
            return Err(not_a_project());
        }

        let mut markers = MarkerMap::default();
        for marker in document.markers {
            markers.add(marker)?;
        }

        let obstacles = document
            .obstacles
            .into_iter()
            .map(Obstacle::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            markers,
            obstacles: ObstacleStore::from_obstacles(obstacles),
            plan: FlightPlan::from_waypoints(
                document.flight_plan.into_iter().map(Vec3::from_array).collect(),
            ),
        })
    }

    /// Parse a project file. The metadata type is checked before the rest of
    /// the document so foreign JSON gets a format error rather than a field error.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let project_type = value
            .get("metadata")
            .and_then(|m| m.get("type"))
            .and_then(|t| t.as_str());
        if project_type != Some(PROJECT_TYPE) {
            return Err(not_a_project());
        }

        let document: SavedProject = serde_json::from_value(value)?;
        Self::from_document(document)
    }
}

fn not_a_project() -> PlannerError {
    PlannerError::format(format!("not an {} file", PROJECT_TYPE))
}

//! Blocking read/write of the three file formats. Called from I/O tasks.

use bevy::log::warn;
use bevy::math::{Vec2, Vec3};
use std::path::{Path, PathBuf};

use crate::constants::PROJECT_EXTENSION;
use crate::error::{PlannerError, Result};
use crate::map::{FlightPlan, MarkerMap, ProjectSnapshot};

pub fn read_marker_map(path: &Path) -> Result<MarkerMap> {
    let text = std::fs::read_to_string(path)?;
    MarkerMap::from_text(&text)
}

pub fn write_marker_map(path: &Path, markers: &MarkerMap) -> Result<()> {
    std::fs::write(path, markers.to_text())?;
    Ok(())
}

pub fn read_flight_plan(path: &Path, known_positions: &[Vec2]) -> Result<Vec<Vec3>> {
    let text = std::fs::read_to_string(path)?;
    FlightPlan::parse(&text, known_positions)
}

pub fn write_flight_plan(path: &Path, plan: &FlightPlan) -> Result<()> {
    if plan.is_empty() {
        return Err(PlannerError::validation("flight plan is empty"));
    }
    std::fs::write(path, plan.serialize())?;
    Ok(())
}

pub fn read_project(path: &Path) -> Result<ProjectSnapshot> {
    let json = std::fs::read_to_string(path)?;
    ProjectSnapshot::from_json(&json)
}

pub fn write_project(path: &Path, project: &ProjectSnapshot) -> Result<()> {
    let json = project.to_json()?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Append the project extension when a save dialog returned a bare name.
pub fn with_project_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == PROJECT_EXTENSION) {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".");
        name.push(PROJECT_EXTENSION);
        PathBuf::from(name)
    }
}

pub fn ensure_projects_directory() {
    let dir = crate::paths::projects_dir();
    if !dir.exists()
        && let Err(e) = std::fs::create_dir_all(&dir)
    {
        warn!("Failed to create projects directory: {}", e);
    }
}

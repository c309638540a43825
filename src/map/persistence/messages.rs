//! Message types for file operations.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::map::MarkerMap;

#[derive(Message)]
pub struct LoadMapRequest {
    pub path: PathBuf,
}

/// Write a marker map as text. Carries the markers so the marker editor can
/// export its working copy.
#[derive(Message)]
pub struct ExportMapRequest {
    pub path: PathBuf,
    pub markers: MarkerMap,
}

#[derive(Message)]
pub struct LoadPlanRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct SavePlanRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct LoadProjectRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct SaveProjectRequest {
    pub path: PathBuf,
}

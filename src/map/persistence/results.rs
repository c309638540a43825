//! Result types for async file operations.

use bevy::math::Vec3;
use std::path::PathBuf;

use crate::config::PathKind;
use crate::error::Result;
use crate::map::{MarkerMap, ProjectSnapshot};

/// What a finished task produced
pub enum FileOutcome {
    MapLoaded(Result<MarkerMap>),
    PlanLoaded(Result<Vec<Vec3>>),
    ProjectLoaded(Result<ProjectSnapshot>),
    Saved(Result<()>),
}

/// Result of an async file operation
pub struct FileOpResult {
    pub path: PathBuf,
    pub kind: PathKind,
    pub outcome: FileOutcome,
}

//! Error taxonomy shared by the map, plan and project formats.

use thiserror::Error;

use crate::constants::MAX_REPORTED_MAP_ERRORS;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Marker not found: ({x:.2}, {y:.2})")]
    MarkerNotFound { x: f32, y: f32 },

    #[error("{}", join_map_errors(.0))]
    MapRejected(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

fn join_map_errors(errors: &[String]) -> String {
    errors
        .iter()
        .take(MAX_REPORTED_MAP_ERRORS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, PlannerError>;

//! Unit tests for the persistence module.

use bevy::math::{Vec2, Vec3};
use std::path::{Path, PathBuf};

use crate::config::PathKind;
use crate::editor::EditorState;
use crate::error::PlannerError;
use crate::map::{FlightPlan, MarkerMap, ObstacleKind};

use super::files::{
    read_flight_plan, read_marker_map, read_project, with_project_extension, write_flight_plan,
    write_marker_map, write_project,
};
use super::resources::{AsyncFileOperation, NoticeLevel};
use super::results::FileOutcome;
use super::tasks::{apply_outcome, file_label, notice_for};

const TWO_MARKERS: &str = "0 0.18 0.0 0.0 0.0 0.0 0.0 0.0\n1 0.18 1.0 0.0 0.0 0.0 0.0 0.0\n";

fn loaded_state() -> EditorState {
    let mut state = EditorState::default();
    state
        .apply_map_load(MarkerMap::from_text(TWO_MARKERS))
        .unwrap();
    state
}

// AsyncFileOperation tests
#[test]
fn test_async_operation_default_not_busy() {
    let op = AsyncFileOperation::default();
    assert!(!op.is_busy());
    assert!(op.operation_description.is_none());
}

#[test]
fn test_async_operation_begin_and_finish() {
    let mut op = AsyncFileOperation::default();
    op.begin(true, "Saving plan.txt...".to_string());
    assert!(op.is_busy());
    assert!(op.is_saving);
    assert!(!op.is_loading);

    op.finish();
    assert!(!op.is_busy());
    assert!(op.operation_description.is_none());
}

#[test]
fn test_file_label() {
    assert_eq!(file_label(Path::new("/tmp/field.txt")), "field.txt");
    assert_eq!(file_label(Path::new("/")), "file");
}

// File helper tests
#[test]
fn test_marker_map_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.txt");
    std::fs::write(&path, TWO_MARKERS).unwrap();

    let markers = read_marker_map(&path).unwrap();
    assert_eq!(markers.len(), 2);

    let exported = dir.path().join("export.txt");
    write_marker_map(&exported, &markers).unwrap();
    let text = std::fs::read_to_string(&exported).unwrap();
    assert!(text.starts_with("# id"));
    assert_eq!(read_marker_map(&exported).unwrap(), markers);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_marker_map(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, PlannerError::Io(_)));
}

#[test]
fn test_flight_plan_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.txt");
    let plan = FlightPlan::from_waypoints(vec![Vec3::new(1.0, 0.0, 0.5)]);

    write_flight_plan(&path, &plan).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[(1.00,0.00,0.50)]");

    let known = [Vec2::ZERO, Vec2::new(1.0, 0.0)];
    assert_eq!(read_flight_plan(&path, &known).unwrap(), plan.waypoints());
}

#[test]
fn test_empty_flight_plan_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.txt");
    assert!(write_flight_plan(&path, &FlightPlan::default()).is_err());
    assert!(!path.exists());
}

#[test]
fn test_project_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("field.aproject");

    let mut state = loaded_state();
    state.obstacles.place(ObstacleKind::Box, Vec2::new(2.0, 2.0));
    state.pointer_down(Vec2::new(1.0, 0.0));
    state.add_waypoint(0.5).unwrap();

    write_project(&path, &state.snapshot()).unwrap();
    assert_eq!(read_project(&path).unwrap(), state.snapshot());
}

#[test]
fn test_with_project_extension() {
    assert_eq!(
        with_project_extension(PathBuf::from("/p/field")),
        PathBuf::from("/p/field.aproject")
    );
    assert_eq!(
        with_project_extension(PathBuf::from("/p/field.aproject")),
        PathBuf::from("/p/field.aproject")
    );
}

// Applying results
#[test]
fn test_apply_map_failure_rolls_back() {
    let mut state = loaded_state();
    let outcome = FileOutcome::MapLoaded(MarkerMap::from_text("1 0.2 0 0\n"));
    let result = apply_outcome(&mut state, Path::new("bad.txt"), outcome);

    assert!(result.is_err());
    assert!(state.markers.is_empty());
}

#[test]
fn test_apply_plan_success() {
    let mut state = loaded_state();
    let known = state.markers.positions();
    let outcome = FileOutcome::PlanLoaded(FlightPlan::parse("[(1.00,0.00,2.00)]", &known));
    let result = apply_outcome(&mut state, Path::new("plan.txt"), outcome);

    assert_eq!(result.unwrap(), "Loaded 1 waypoints");
    assert_eq!(state.plan.waypoints(), &[Vec3::new(1.0, 0.0, 2.0)]);
}

#[test]
fn test_apply_project_failure_resets_everything() {
    let mut state = loaded_state();
    state.obstacles.place(ObstacleKind::Flag, Vec2::ONE);
    let outcome = FileOutcome::ProjectLoaded(Err(PlannerError::format("not an aruco_project file")));
    assert!(apply_outcome(&mut state, Path::new("x.aproject"), outcome).is_err());

    assert!(state.markers.is_empty());
    assert!(state.obstacles.is_empty());
    assert!(state.plan.is_empty());
}

#[test]
fn test_apply_save_leaves_state_untouched() {
    let mut state = loaded_state();
    let result = apply_outcome(&mut state, Path::new("out.txt"), FileOutcome::Saved(Ok(())));
    assert_eq!(result.unwrap(), "Saved to out.txt");
    assert_eq!(state.markers.len(), 2);
}

// Notices
#[test]
fn test_notice_for_success_and_failure() {
    let ok = notice_for(PathKind::Project, true, &Ok("Saved".to_string()));
    assert_eq!(ok.level, NoticeLevel::Info);
    assert_eq!(ok.title, "Project");

    let err = notice_for(
        PathKind::Map,
        false,
        &Err(PlannerError::MapRejected(vec!["Line 1: expected 8 fields, found 4".to_string()])),
    );
    assert_eq!(err.level, NoticeLevel::Error);
    assert_eq!(err.title, "Map load failed");
    assert!(err.message.contains("Line 1"));
}

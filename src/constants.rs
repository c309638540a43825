//! Centralized constants used across the application.
//!
//! Geometry values are in map units (the same units as the marker map file).

/// Default window width in pixels (also used for grid viewport calculations)
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels (also used for grid viewport calculations)
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Maximum number of recent projects to remember in config
pub const MAX_RECENT_PROJECTS: usize = 5;

/// Number of map line errors shown to the user when a map is rejected
pub const MAX_REPORTED_MAP_ERRORS: usize = 5;

/// Project file metadata
pub const PROJECT_TYPE: &str = "aruco_project";
pub const PROJECT_VERSION: &str = "1.0";
pub const PROJECT_EXTENSION: &str = "aproject";

/// Header line written at the top of exported marker maps
pub const MAP_EXPORT_HEADER: &str = "# id\tlength\tx\ty\tz\trot_z\trot_y\trot_x";

// Obstacle defaults when placed
pub const BOX_DEFAULT_SIZE: f32 = 0.6;
pub const ARCH_DEFAULT_LENGTH: f32 = 1.0;
pub const ARCH_DEFAULT_THICKNESS: f32 = 0.2;
pub const FLAG_DEFAULT_RADIUS: f32 = 0.25;

// Obstacle floors; no resize may go below these
pub const BOX_MIN_SIZE: f32 = 0.2;
pub const ARCH_MIN_LENGTH: f32 = 0.3;
pub const ARCH_MIN_THICKNESS: f32 = 0.1;
pub const FLAG_MIN_RADIUS: f32 = 0.1;

/// Radius of a resize handle, also its pick radius
pub const HANDLE_RADIUS: f32 = 0.1;

/// Extra slack around obstacle shapes when picking
pub const OBSTACLE_PICK_TOLERANCE: f32 = 0.0;

/// Maximum distance from a marker center for a click to select it
pub const MARKER_PICK_TOLERANCE: f32 = 0.11;

/// Height pre-filled in the waypoint entry when config has none
pub const DEFAULT_WAYPOINT_HEIGHT: f32 = 1.0;

/// Camera zoom (world units per pixel)
pub const DEFAULT_ZOOM: f32 = 0.01;
pub const MIN_ZOOM: f32 = 0.001;
pub const MAX_ZOOM: f32 = 0.1;

/// Spacing of background grid lines in map units
pub const GRID_SPACING: f32 = 1.0;

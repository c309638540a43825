//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the editor UI and rendering.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

use crate::map::{NoticeLevel, ObstacleKind};

// ============================================================================
// Grid Colors
// ============================================================================

/// Semi-transparent grey grid lines
pub const GRID_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.3);

/// Slightly stronger lines through the origin
pub const AXIS_COLOR: Color = Color::srgba(0.7, 0.7, 0.7, 0.6);

// ============================================================================
// Marker Colors
// ============================================================================

/// Marker footprint outline
pub const MARKER_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);

/// Marker picked for waypoint operations
pub const MARKER_HIGHLIGHT: Color = Color::srgb(0.2, 1.0, 0.3);

// ============================================================================
// Obstacle Colors
// ============================================================================

pub fn obstacle_color(kind: ObstacleKind) -> Color {
    match kind {
        ObstacleKind::Box => Color::srgb(0.9, 0.3, 0.3),
        ObstacleKind::Arch => Color::srgb(0.9, 0.6, 0.2),
        ObstacleKind::Flag => Color::srgb(0.8, 0.3, 0.9),
    }
}

/// Light blue for the selected obstacle outline
pub const SELECTION_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);

/// Resize handles of the selected obstacle
pub const HANDLE_COLOR: Color = Color::srgb(1.0, 1.0, 0.2);

// ============================================================================
// Flight Path Colors
// ============================================================================

pub const PATH_COLOR: Color = Color::srgb(0.2, 0.8, 1.0);

// ============================================================================
// UI Colors
// ============================================================================

/// Orange for warning text
pub const WARNING_TEXT: egui::Color32 = egui::Color32::from_rgb(255, 180, 0);

/// Red for error messages
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(255, 100, 100);

/// Green for placement mode indicator
pub const PLACEMENT_ACTIVE_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 220, 100);

pub fn notice_text_color(level: NoticeLevel) -> egui::Color32 {
    match level {
        NoticeLevel::Info => egui::Color32::LIGHT_GRAY,
        NoticeLevel::Error => ERROR_TEXT,
    }
}

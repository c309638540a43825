//! Common types shared across multiple modules.

use bevy::window::{CursorIcon, SystemCursorIcon};

/// What a held pointer is currently doing to the selected obstacle.
///
/// Used by the edit session for its state and by the cursor system for
/// feedback.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum DragMode {
    #[default]
    None,
    Move,
    Resize,
}

impl DragMode {
    /// Get the appropriate cursor icon for this drag mode.
    pub fn cursor_icon(&self) -> Option<CursorIcon> {
        match self {
            DragMode::None => None,
            DragMode::Move => Some(CursorIcon::System(SystemCursorIcon::Move)),
            DragMode::Resize => Some(CursorIcon::System(SystemCursorIcon::NeswResize)),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DragMode::None)
    }
}

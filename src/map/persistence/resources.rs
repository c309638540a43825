//! Resource types for file operation state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use super::results::FileOpResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One message for the operator, shown until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The notice currently on screen; a newer one replaces it. File operations
/// and editing errors both report here.
#[derive(Resource, Default)]
pub struct UserNotice {
    pub current: Option<Notice>,
}

/// Resource tracking async file I/O operations for modal dialog
#[derive(Resource, Default)]
pub struct AsyncFileOperation {
    /// Whether a save operation is in progress
    pub is_saving: bool,
    /// Whether a load operation is in progress
    pub is_loading: bool,
    /// Description of the current operation
    pub operation_description: Option<String>,
}

impl AsyncFileOperation {
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_loading
    }

    pub fn begin(&mut self, saving: bool, description: String) {
        self.is_saving = saving;
        self.is_loading = !saving;
        self.operation_description = Some(description);
    }

    pub fn finish(&mut self) {
        self.is_saving = false;
        self.is_loading = false;
        self.operation_description = None;
    }
}

/// Component for a running file task
#[derive(Component)]
pub struct FileTask(pub Task<FileOpResult>);

/// Resource tracking the project file last loaded or saved
#[derive(Resource, Default)]
pub struct CurrentProjectFile {
    pub path: Option<PathBuf>,
}

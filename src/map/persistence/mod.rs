//! File persistence for marker maps, flight plans and projects.
//!
//! Reading, parsing and writing run on the I/O task pool; results are polled
//! and applied to [`EditorState`](crate::editor::EditorState) on the main
//! schedule, so the model only ever has one writer.
//!
//! ## Module Structure
//!
//! - [`messages`] - Request messages for each file operation
//! - [`resources`] - Busy state, notices, current project path
//! - [`results`] - Result types for async operations
//! - [`files`] - Blocking read/write of each format
//! - [`load`] - Load request systems
//! - [`save`] - Save and export request systems
//! - [`tasks`] - Task spawning and result polling
//!
//! Only one operation runs at a time; requests arriving while busy are
//! dropped with a warning.

mod files;
mod load;
mod messages;
mod resources;
mod results;
mod save;
mod tasks;

#[cfg(test)]
mod tests;

// Re-exports - Messages
pub use messages::{
    ExportMapRequest, LoadMapRequest, LoadPlanRequest, LoadProjectRequest, SavePlanRequest,
    SaveProjectRequest,
};

// Re-exports - Resources
pub use resources::{AsyncFileOperation, CurrentProjectFile, Notice, NoticeLevel, UserNotice};

// Re-exports - Helpers
pub use files::ensure_projects_directory;

// Re-exports - Systems
pub use load::{load_map_system, load_plan_system, load_project_system};
pub use save::{export_map_system, save_plan_system, save_project_system};
pub use tasks::poll_file_tasks;

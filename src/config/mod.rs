use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_WAYPOINT_HEIGHT, MAX_RECENT_PROJECTS};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_height() -> f32 {
    DEFAULT_WAYPOINT_HEIGHT
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Last marker map opened or exported
    #[serde(default)]
    pub last_map_path: Option<PathBuf>,

    /// Last flight plan opened or saved
    #[serde(default)]
    pub last_plan_path: Option<PathBuf>,

    /// Last project opened or saved (not auto-loaded, just remembered)
    #[serde(default)]
    pub last_project_path: Option<PathBuf>,

    /// Recently used projects, most recent first
    #[serde(default)]
    pub recent_projects: Vec<PathBuf>,

    /// Height pre-filled into the waypoint height field
    #[serde(default = "default_height")]
    pub default_height: f32,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            last_map_path: None,
            last_plan_path: None,
            last_project_path: None,
            recent_projects: Vec::new(),
            default_height: DEFAULT_WAYPOINT_HEIGHT,
        }
    }
}

/// Which kind of file a remembered path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Map,
    Plan,
    Project,
}

impl AppConfigData {
    pub fn remember(&mut self, kind: PathKind, path: &Path) {
        let path = path.to_path_buf();
        match kind {
            PathKind::Map => self.last_map_path = Some(path),
            PathKind::Plan => self.last_plan_path = Some(path),
            PathKind::Project => {
                // Move to front if already present
                self.recent_projects.retain(|p| p != &path);
                self.recent_projects.insert(0, path.clone());
                self.recent_projects.truncate(MAX_RECENT_PROJECTS);
                self.last_project_path = Some(path);
            }
        }
    }

    /// Directory a file dialog for `kind` should open in.
    pub fn dialog_directory(&self, kind: PathKind) -> Option<PathBuf> {
        let last = match kind {
            PathKind::Map => self.last_map_path.as_ref(),
            PathKind::Plan => self.last_plan_path.as_ref(),
            PathKind::Project => self.last_project_path.as_ref(),
        };
        last.and_then(|p| p.parent()).map(Path::to_path_buf)
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember a successfully opened or saved file
#[derive(Message)]
pub struct RememberPathRequest {
    pub kind: PathKind,
    pub path: PathBuf,
}

/// Read config data, returning the reason when defaults had to be used.
fn read_config(config_path: &Path) -> (AppConfigData, Option<String>) {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return (AppConfigData::default(), None);
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(data) => {
                info!("Loaded config from {:?}", config_path);
                (data, None)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Configuration file was corrupted: {}", e)),
                )
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let (data, reset_reason) = read_config(&config.config_path);
    config.data = data;
    config.dirty = false;

    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to record opened/saved file paths
fn remember_path_system(
    mut events: MessageReader<RememberPathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.remember(event.kind, &event.path);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<RememberPathRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    remember_path_system.run_if(on_message::<RememberPathRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

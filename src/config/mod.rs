use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_BRUSH_RADIUS, DEFAULT_CELL_SIZE, DEFAULT_HISTORY_LIMIT, DEFAULT_MAP_HEIGHT,
    DEFAULT_MAP_WIDTH, MAX_BRUSH_RADIUS,
};
use crate::editor::{CellSize, CommandHistory, Palette};
use crate::map::TileGrid;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Editor configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfigData {
    /// Tile edge length in pixels
    pub cell_size: u32,
    pub brush_radius: u32,
    /// Size of the map created at startup
    pub map_width: u32,
    pub map_height: u32,
    /// Number of gestures that can be undone
    pub history_limit: usize,
}

impl Default for EditorConfigData {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            brush_radius: DEFAULT_BRUSH_RADIUS,
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EditorConfigData {
    /// Pull every field into its valid range
    pub fn clamped(self) -> Self {
        Self {
            cell_size: CellSize::new(self.cell_size).pixels(),
            brush_radius: self.brush_radius.min(MAX_BRUSH_RADIUS),
            map_width: self.map_width.max(1),
            map_height: self.map_height.max(1),
            history_limit: self.history_limit.max(1),
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct EditorConfig {
    /// The persisted configuration data
    pub data: EditorConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            data: EditorConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Read and validate a config file.
///
/// A missing file yields the defaults silently; an unreadable or corrupt one
/// yields the defaults with a warning.
fn load_config(path: &Path) -> EditorConfigData {
    if !path.exists() {
        info!("No config file found, using defaults");
        return EditorConfigData::default();
    }

    match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str::<EditorConfigData>(&json) {
            Ok(data) => {
                info!("Loaded config from {:?}", path);
                data.clamped()
            }
            Err(e) => {
                warn!("Failed to parse config file, using defaults: {}", e);
                EditorConfigData::default()
            }
        },
        Err(e) => {
            warn!("Failed to read config file, using defaults: {}", e);
            EditorConfigData::default()
        }
    }
}

/// Save configuration to disk
fn save_config(config: &EditorConfig) {
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
fn load_config_system(mut config: ResMut<EditorConfig>) {
    config.data = load_config(&config.config_path);
    config.dirty = false;
}

/// Startup system pushing the loaded values into the editor resources
fn apply_config_system(
    config: Res<EditorConfig>,
    mut cell_size: ResMut<CellSize>,
    mut palette: ResMut<Palette>,
    mut history: ResMut<CommandHistory>,
    mut grid: ResMut<TileGrid>,
) {
    let data = &config.data;
    *cell_size = CellSize::new(data.cell_size);
    palette.set_brush_radius(data.brush_radius);
    history.set_limit(data.history_limit);

    match TileGrid::new(data.map_width, data.map_height) {
        Ok(new_grid) => *grid = new_grid,
        Err(e) => warn!("Keeping default map size: {}", e),
    }
}

/// Remember zoom and brush changes across sessions
fn track_editor_settings(
    cell_size: Res<CellSize>,
    palette: Res<Palette>,
    mut config: ResMut<EditorConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    if config.data.cell_size == cell_size.pixels()
        && config.data.brush_radius == palette.brush_radius
    {
        return;
    }
    config.data.cell_size = cell_size.pixels();
    config.data.brush_radius = palette.brush_radius;
    config.dirty = true;
    save_events.write(SaveConfigRequest);
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<EditorConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorConfig>()
            .add_message::<SaveConfigRequest>()
            .add_systems(
                Startup,
                (load_config_system, apply_config_system)
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    track_editor_settings
                        .run_if(resource_changed::<CellSize>.or(resource_changed::<Palette>)),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

mod camera;
mod conditions;
pub mod coords;
pub mod gesture;
pub mod history;
mod input;
mod label;
mod palette;
pub mod params;
mod preview;
pub mod tools;

pub use coords::CellSize;
pub use history::CommandHistory;
pub use input::ActiveGesture;
pub use label::LabelPrompt;
pub use palette::{Palette, DEFAULT_OVERLAY};
pub use tools::{CurrentTool, EditorTool, SelectedLayer, ToolFamily, ToolMode};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigLoaded;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<tools::CurrentTool>()
            .init_resource::<tools::SelectedLayer>()
            .init_resource::<CellSize>()
            .init_resource::<Palette>()
            .init_resource::<CommandHistory>()
            .init_resource::<ActiveGesture>()
            .init_resource::<LabelPrompt>()
            .add_systems(Startup, camera::spawn_camera.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::recenter_camera,
                    tools::handle_tool_shortcuts.run_if(conditions::no_dialog_open),
                    tools::update_cursor_icon,
                    palette::handle_palette_shortcuts.run_if(conditions::no_dialog_open),
                ),
            )
            .add_systems(
                Update,
                (
                    input::handle_pointer,
                    history::handle_undo,
                    history::handle_redo,
                )
                    .chain()
                    .run_if(conditions::no_dialog_open),
            )
            .add_systems(
                Update,
                (preview::draw_map_preview, preview::draw_hover).after(input::handle_pointer),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (preview::render_tile_labels, label::label_prompt_ui),
            );
    }
}
